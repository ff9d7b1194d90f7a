//! Human-entered time values: plain seconds, `MM:SS` or `HH:MM:SS.mmm`.

use anyhow::{bail, ensure, Context, Result};

pub fn parse_optional_time(value: Option<&str>, label: &str) -> Result<Option<f64>> {
    match value {
        Some(raw) => parse_time(raw, label).map(Some),
        None => Ok(None),
    }
}

pub fn parse_time(raw: &str, label: &str) -> Result<f64> {
    parse_time_to_seconds(raw).with_context(|| format!("Invalid {} time '{}'", label, raw))
}

fn parse_time_to_seconds(raw: &str) -> Result<f64> {
    if raw.contains(':') {
        return parse_hms_time(raw);
    }

    let seconds: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("Failed to parse seconds value '{}'", raw))?;
    ensure!(
        seconds.is_finite() && seconds >= 0.0,
        "Time values must be non-negative"
    );
    Ok(seconds)
}

fn parse_hms_time(raw: &str) -> Result<f64> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (Some(*h), *m, *s),
        [m, s] => (None, *m, *s),
        _ => bail!("Time format must be MM:SS or HH:MM:SS"),
    };

    let seconds = seconds
        .replace(',', ".")
        .parse::<f64>()
        .with_context(|| format!("Invalid seconds component '{}'", seconds))?;
    let minutes = minutes
        .parse::<f64>()
        .with_context(|| format!("Invalid minutes component '{}'", minutes))?;
    ensure!(minutes >= 0.0, "Minutes must be non-negative");
    ensure!(seconds >= 0.0, "Seconds must be non-negative");

    let hours = match hours {
        Some(raw_hours) => {
            let value = raw_hours
                .parse::<f64>()
                .with_context(|| format!("Invalid hours component '{}'", raw_hours))?;
            ensure!(value >= 0.0, "Hours must be non-negative");
            value
        }
        None => 0.0,
    };

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_time_seconds() {
        let result = parse_optional_time(Some("12.5"), "start").unwrap();
        assert_eq!(result, Some(12.5));
    }

    #[test]
    fn parse_time_hms() {
        let result = parse_optional_time(Some("01:02:03.5"), "end").unwrap();
        let expected = 3600.0 + 120.0 + 3.5;
        assert!((result.unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn parse_time_minutes_with_srt_comma() {
        assert!((parse_time("02:03,250", "end").unwrap() - 123.25).abs() < 1e-9);
    }

    #[test]
    fn absent_time_is_none() {
        assert_eq!(parse_optional_time(None, "start").unwrap(), None);
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(parse_time("-3", "start").is_err());
        assert!(parse_time("1:2:3:4", "start").is_err());
        let err = parse_time("ab:cd", "end").unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid end time"));
    }
}
