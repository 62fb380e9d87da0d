//! Filter pipeline
//!
//! Derives the displayed lines from the loaded ones in three stages: level
//! threshold, text filter, then optional timestamp stripping. The pipeline is
//! a pure function of its inputs and always works on copies.

use logpanel_core::{LogFilter, LogLevel, LogLine};

use crate::config::PanelSettings;

/// The settings that feed the filter pipeline
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSettings {
    pub level: LogLevel,
    pub kind: LogFilter,
    pub text: String,
    pub show_timestamps: bool,
}

impl From<&PanelSettings> for FilterSettings {
    fn from(settings: &PanelSettings) -> Self {
        Self {
            level: settings.level,
            kind: settings.filter_kind,
            text: settings.filter_text.clone(),
            show_timestamps: settings.show_timestamps,
        }
    }
}

/// Apply the full pipeline to `lines`
pub fn filter_lines(lines: &[LogLine], settings: &FilterSettings) -> Vec<LogLine> {
    lines
        .iter()
        .filter(|line| settings.level.admits(&line.text))
        .filter(|line| settings.kind.matches(&line.text, &settings.text))
        .map(|line| {
            if settings.show_timestamps {
                line.clone()
            } else {
                line.without_timestamp()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_lines;

    const SAMPLE: &str = "2024-01-01 [Info] start\n2024-01-01 [Error] boom\n";

    fn settings(level: LogLevel, kind: LogFilter, text: &str, show_timestamps: bool) -> FilterSettings {
        FilterSettings {
            level,
            kind,
            text: text.to_string(),
            show_timestamps,
        }
    }

    fn texts(lines: &[LogLine]) -> Vec<String> {
        lines.iter().map(|l| l.text.clone()).collect()
    }

    fn mixed_lines() -> Vec<LogLine> {
        parse_lines(
            "t0 [Debug] a\n\
             t1 [Info] b\n\
             t2 [Warning] c\n\
             t3 [Error] d\n\
             untagged e\n\
             t5 [Info] radio > Radio connected\n",
        )
    }

    #[test]
    fn test_warning_threshold_keeps_only_error() {
        let lines = parse_lines(SAMPLE);
        let out = filter_lines(&lines, &settings(LogLevel::Warning, LogFilter::None, "", true));
        assert_eq!(texts(&out), vec!["2024-01-01 [Error] boom"]);
    }

    #[test]
    fn test_hidden_timestamps_strip_prefix() {
        let lines = parse_lines(SAMPLE);
        let out = filter_lines(&lines, &settings(LogLevel::Warning, LogFilter::None, "", false));
        assert_eq!(texts(&out), vec!["[Error] boom"]);
        // Input untouched
        assert_eq!(lines[1].text, "2024-01-01 [Error] boom");
    }

    #[test]
    fn test_debug_keeps_everything() {
        let lines = mixed_lines();
        let out = filter_lines(&lines, &settings(LogLevel::Debug, LogFilter::None, "", true));
        assert_eq!(out, lines);
    }

    #[test]
    fn test_info_drops_debug_and_untagged() {
        let lines = mixed_lines();
        let out = filter_lines(&lines, &settings(LogLevel::Info, LogFilter::None, "", true));
        assert_eq!(
            texts(&out),
            vec![
                "t1 [Info] b",
                "t2 [Warning] c",
                "t3 [Error] d",
                "t5 [Info] radio > Radio connected"
            ]
        );
    }

    #[test]
    fn test_level_threshold_is_monotonic() {
        let lines = mixed_lines();
        let kept = |level| {
            filter_lines(&lines, &settings(level, LogFilter::None, "", true))
                .into_iter()
                .map(|l| l.id)
                .collect::<Vec<_>>()
        };
        let (debug, info, warning, error) = (
            kept(LogLevel::Debug),
            kept(LogLevel::Info),
            kept(LogLevel::Warning),
            kept(LogLevel::Error),
        );
        assert!(error.iter().all(|id| warning.contains(id)));
        assert!(warning.iter().all(|id| info.contains(id)));
        assert!(info.iter().all(|id| debug.contains(id)));
        assert_eq!(error.len(), 1);
    }

    #[test]
    fn test_includes_and_excludes() {
        let lines = mixed_lines();
        let inc = filter_lines(&lines, &settings(LogLevel::Debug, LogFilter::Includes, "Radio", true));
        assert_eq!(texts(&inc), vec!["t5 [Info] radio > Radio connected"]);

        let exc = filter_lines(&lines, &settings(LogLevel::Debug, LogFilter::Excludes, "Radio", true));
        assert_eq!(exc.len(), lines.len() - 1);
    }

    #[test]
    fn test_empty_text_includes_all_excludes_none() {
        let lines = mixed_lines();
        let level_only = filter_lines(&lines, &settings(LogLevel::Info, LogFilter::None, "", true));

        let inc = filter_lines(&lines, &settings(LogLevel::Info, LogFilter::Includes, "", true));
        assert_eq!(inc, level_only);

        let exc = filter_lines(&lines, &settings(LogLevel::Info, LogFilter::Excludes, "", true));
        assert!(exc.is_empty());
    }

    #[test]
    fn test_prefix_filter_needs_spaced_delimiter() {
        let lines = parse_lines("x > Radio connected\nx >Radio connected\n");
        let out = filter_lines(&lines, &settings(LogLevel::Debug, LogFilter::Prefix, "Radio", true));
        assert_eq!(texts(&out), vec!["x > Radio connected"]);
    }

    #[test]
    fn test_text_filter_runs_before_timestamp_strip() {
        // The filter sees the full line, timestamp included
        let lines = parse_lines("2024-01-01 [Info] start\n");
        let out = filter_lines(
            &lines,
            &settings(LogLevel::Debug, LogFilter::Includes, "2024", false),
        );
        assert_eq!(texts(&out), vec!["[Info] start"]);
    }

    #[test]
    fn test_strip_leaves_bracketless_lines() {
        let lines = parse_lines("no tags at all\n");
        let out = filter_lines(&lines, &settings(LogLevel::Debug, LogFilter::None, "", false));
        assert_eq!(texts(&out), vec!["no tags at all"]);
    }

    #[test]
    fn test_from_panel_settings() {
        let panel = PanelSettings {
            level: LogLevel::Error,
            filter_kind: LogFilter::Prefix,
            filter_text: "Net".to_string(),
            show_timestamps: false,
            ..PanelSettings::default()
        };
        let fs = FilterSettings::from(&panel);
        assert_eq!(fs, settings(LogLevel::Error, LogFilter::Prefix, "Net", false));
    }
}
