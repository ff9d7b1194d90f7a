use anyhow::{ensure, Result};
use dasp::interpolate::linear::Linear;
use dasp::{signal, Signal};

/// Linearly resample `samples` from `source_rate` to `target_rate`.
pub fn linear_resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Result<Vec<f32>> {
    ensure!(source_rate > 0, "source sample rate must be positive");
    ensure!(target_rate > 0, "target sample rate must be positive");
    if samples.len() < 2 || source_rate == target_rate {
        return Ok(samples.to_vec());
    }

    let ratio = target_rate as f64 / source_rate as f64;
    let output_len = ((samples.len() as f64) * ratio).ceil().max(1.0) as usize;

    let mut source = signal::from_iter(samples.iter().copied());
    let left = source.next();
    let right = source.next();
    let converter = source.from_hz_to_hz(
        Linear::new(left, right),
        source_rate as f64,
        target_rate as f64,
    );
    let mut output: Vec<f32> = converter.until_exhausted().take(output_len).collect();
    // the converter stops a frame early; hold the last sample
    let last = samples[samples.len() - 1];
    output.resize(output_len, last);
    Ok(output)
}
