// ---------------------------------------------------------------------------
// Canned commentary shown next to the views
// ---------------------------------------------------------------------------
//
// Static reference data, deliberately outside the computational pipeline.
// Lookups are explicit (country, column) / metric keys with a defined
// default for anything unmapped.

const CORPUS_INSIGHTS: &[((&str, &str), &str)] = &[
    (
        ("USA", "pros"),
        "Positive reviews from the USA frequently emphasize pay, benefits, the \
         work environment and the team, showing broad appreciation of the \
         internal work culture and financial compensation.",
    ),
    (
        ("USA", "cons"),
        "Negative feedback from the USA commonly highlights workload, time \
         pressure, people and managers, pointing at work-life balance, work \
         intensity and management as areas of potential growth.",
    ),
    (
        ("USA", "advice to Management"),
        "Advice from US employees often centers on managers, time, team and \
         management, suggesting a need for better leadership communication \
         and sustained attention to employee well-being.",
    ),
    (
        ("India", "pros"),
        "Indian employees frequently highlight pay, work and benefits, largely \
         agreeing with their US counterparts about the strong points of the \
         workplace.",
    ),
    (
        ("India", "cons"),
        "Concerns in Indian reviews cluster around work, time, hours, breaks \
         and long shifts, suggesting the cons often center on a demanding \
         work culture and long hours.",
    ),
    (
        ("India", "advice to Management"),
        "Advice from Indian employees includes words like better, manager, \
         time and management, suggesting demand for improved people \
         management, workload distribution and team support.",
    ),
];

const CORPUS_INSIGHT_DEFAULT: &str =
    "Displays commonly used words in employee reviews for the selected filters.";

/// Commentary for a (country, text column) word-frequency view.
pub fn corpus_insight(country: &str, column: &str) -> &'static str {
    CORPUS_INSIGHTS
        .iter()
        .find(|((c, f), _)| *c == country && f.eq_ignore_ascii_case(column))
        .map(|(_, text)| *text)
        .unwrap_or(CORPUS_INSIGHT_DEFAULT)
}

const METRIC_CONCLUSIONS: &[(&str, &str)] = &[
    (
        "Overall Rating",
        "Overall ratings are higher in the USA, while India shows more variability.",
    ),
    (
        "Work-Life Balance",
        "Work-life balance ratings are more tightly clustered in the USA.",
    ),
    (
        "Compensation & Benefits",
        "Compensation ratings are generally higher in the USA with fewer low outliers.",
    ),
    (
        "Career Opportunities",
        "Both countries show similar medians, but India has wider dispersion.",
    ),
    (
        "Culture & Values",
        "Cultural ratings are balanced, with fewer extreme lows in the USA.",
    ),
    (
        "Senior Management",
        "Management ratings show greater polarization in India.",
    ),
];

const METRIC_CONCLUSION_DEFAULT: &str = "Compares rating trends across countries.";

/// Commentary for a per-metric trend view.
pub fn metric_conclusion(metric: &str) -> &'static str {
    METRIC_CONCLUSIONS
        .iter()
        .find(|(m, _)| *m == metric)
        .map(|(_, text)| *text)
        .unwrap_or(METRIC_CONCLUSION_DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_keys_resolve() {
        assert!(corpus_insight("USA", "pros").contains("pay"));
        assert!(corpus_insight("India", "Advice to Management").contains("management"));
        assert!(metric_conclusion("Senior Management").contains("polarization"));
    }

    #[test]
    fn unmapped_keys_fall_back_to_default() {
        assert_eq!(corpus_insight("Germany", "pros"), CORPUS_INSIGHT_DEFAULT);
        assert_eq!(metric_conclusion("Diversity"), METRIC_CONCLUSION_DEFAULT);
    }
}
