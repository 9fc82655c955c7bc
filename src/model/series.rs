use std::path::PathBuf;

pub type SeriesNumber = i64;

/// Files sharing one series number, plus the user's alias for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub number: SeriesNumber,
    pub name: String,
    pub time: String,
    pub files: Vec<PathBuf>,
    pub echo_times: Vec<f64>,
    pub alias: Option<String>,
}

impl Series {
    pub fn new(number: SeriesNumber, name: impl Into<String>, files: Vec<PathBuf>) -> Self {
        Self {
            number,
            name: name.into(),
            time: String::new(),
            files,
            echo_times: Vec::new(),
            alias: None,
        }
    }

    /// Alias when one is set, header name otherwise.
    pub fn display_name(&self) -> &str {
        match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() => alias,
            _ => &self.name,
        }
    }

    pub fn is_ignored(&self) -> bool {
        self.alias.as_deref() == Some("")
    }

    pub fn is_multi_echo(&self) -> bool {
        self.echo_times.len() > 1
    }

    pub fn echo_tag(&self) -> &'static str {
        if self.is_multi_echo() {
            "ME"
        } else {
            "SE"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_states() {
        let mut series = Series::new(10, "MBME_RPE1", vec![PathBuf::from("a.dcm")]);
        assert_eq!(series.display_name(), "MBME_RPE1");
        assert!(!series.is_ignored());

        series.alias = Some("rest".into());
        assert_eq!(series.display_name(), "rest");

        series.alias = Some(String::new());
        assert!(series.is_ignored());
        assert_eq!(series.display_name(), "MBME_RPE1");
    }

    #[test]
    fn echo_classification() {
        let mut series = Series::new(5, "MBME", Vec::new());
        assert_eq!(series.echo_tag(), "SE");
        series.echo_times = vec![11.2];
        assert_eq!(series.echo_tag(), "SE");
        series.echo_times = vec![11.2, 32.36, 53.52];
        assert_eq!(series.echo_tag(), "ME");
    }
}
