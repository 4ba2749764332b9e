use jiff::SpanRelativeTo;

/// Accepts bare seconds ("90"), friendly spans ("30s", "5m") and ISO 8601
/// durations ("PT1H30M"). Negative durations are rejected.
pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    let duration = if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        duration
    } else if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        duration
    } else if let Ok(seconds) = input.parse::<i64>() {
        jiff::SignedDuration::from_secs(seconds)
    } else {
        return Err(format!("cannot parse {input:?} as a duration"));
    };

    if duration.is_negative() {
        return Err(format!("duration must not be negative, got {input:?}"));
    }

    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_human_and_iso_durations() {
        assert_eq!(
            parse_duration("30s").unwrap(),
            jiff::SignedDuration::from_secs(30)
        );
        assert_eq!(
            parse_duration("5m").unwrap(),
            jiff::SignedDuration::from_mins(5)
        );
        assert_eq!(
            parse_duration("90").unwrap(),
            jiff::SignedDuration::from_secs(90)
        );
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn negative_durations_are_rejected() {
        assert!(parse_duration("-90").is_err());
        assert!(parse_duration("-30s").is_err());
        assert!(parse_duration("-PT5M").is_err());
    }
}
