//! Localized label sets. The language variant changes strings only;
//! layout logic is shared.

/// Output language of the exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Th,
}

impl Language {
    /// Tag appended to the output file name; the default language gets
    /// none.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Language::En => None,
            Language::Th => Some("TH"),
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Language::En => &EN,
            Language::Th => &TH,
        }
    }
}

/// Fixed strings drawn by the composer.
#[derive(Debug)]
pub struct Labels {
    pub report_title: &'static str,
    pub ticker: &'static str,
    pub analysis_date: &'static str,
    pub recommendation: &'static str,
    pub page: &'static str,
    pub empty_list: &'static str,
}

static EN: Labels = Labels {
    report_title: "Analysis Report",
    ticker: "Ticker",
    analysis_date: "Analysis Date",
    recommendation: "Recommendation",
    page: "Page",
    empty_list: "None",
};

static TH: Labels = Labels {
    report_title: "รายงานการวิเคราะห์",
    ticker: "หุ้น",
    analysis_date: "วันที่วิเคราะห์",
    recommendation: "คำแนะนำ",
    page: "หน้า",
    empty_list: "ไม่มี",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_language_has_no_file_tag() {
        assert_eq!(Language::En.tag(), None);
        assert_eq!(Language::Th.tag(), Some("TH"));
    }

    #[test]
    fn thai_labels_are_thai_script() {
        assert_eq!(crate::detect_script(Language::Th.labels().page), crate::Script::Thai);
    }
}
