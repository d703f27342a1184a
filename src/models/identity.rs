//! Document identity and filename stem derivation.

/// Fields identifying one statute page, extracted from its markup and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentIdentity {
    /// Schedule number, when the page is a schedule ("SCHEDULE 7")
    pub schedule_number: Option<String>,

    /// Section number from the bold heading, trailing periods stripped
    pub section_number: Option<String>,

    /// Four-digit year from the page title, or "-" when absent
    pub year: String,
}

impl DocumentIdentity {
    /// True when neither a schedule nor a section heading was found.
    pub fn is_anonymous(&self) -> bool {
        self.schedule_number.is_none() && self.section_number.is_none()
    }

    /// Derive the filename stem for this page.
    ///
    /// Schedule numbering always takes priority over section numbering.
    /// A page with neither heading keeps the historical literal "None"
    /// stem rather than inventing a new naming scheme.
    pub fn stem(&self, abbr: &str) -> String {
        let stem = match &self.schedule_number {
            Some(n) => format!("schedule{}_{}{}", n, abbr, self.year),
            None => format!(
                "s{}_{}{}",
                self.section_number.as_deref().unwrap_or("None"),
                abbr,
                self.year
            ),
        };
        sanitize(&stem)
    }
}

/// Replace characters that cannot appear in a single path component.
fn sanitize(stem: &str) -> String {
    stem.chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '-',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(
        schedule: Option<&str>,
        section: Option<&str>,
        year: &str,
    ) -> DocumentIdentity {
        DocumentIdentity {
            schedule_number: schedule.map(String::from),
            section_number: section.map(String::from),
            year: year.to_string(),
        }
    }

    #[test]
    fn test_section_stem() {
        assert_eq!(identity(None, Some("5"), "1997").stem("tca"), "s5_tca1997");
    }

    #[test]
    fn test_schedule_stem() {
        assert_eq!(
            identity(Some("7"), None, "2010").stem("vat"),
            "schedule7_vat2010"
        );
    }

    #[test]
    fn test_schedule_wins_over_section() {
        assert_eq!(
            identity(Some("2"), Some("5"), "2003").stem("cat"),
            "schedule2_cat2003"
        );
    }

    #[test]
    fn test_anonymous_page_keeps_none_stem() {
        let id = identity(None, None, "-");
        assert!(id.is_anonymous());
        assert_eq!(id.stem("sdca"), "sNone_sdca-");
    }

    #[test]
    fn test_stem_sanitizes_path_separators() {
        assert_eq!(
            identity(None, Some("5/A"), "1999").stem("sdca"),
            "s5-A_sdca1999"
        );
    }
}
