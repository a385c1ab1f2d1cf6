// Prompt composer - turns an aggregation into text for the model
use crate::domain::analysis::Aggregation;

/// System-role instruction sent with every insights request.
pub const SYSTEM_PROMPT: &str = "You are an assistant specialized in analyzing sales data.";

/// Number of ranking entries quoted in a summary.
const SUMMARY_RANKING_LEN: usize = 5;

pub fn compose_summary(aggregation: &Aggregation) -> String {
    match aggregation {
        Aggregation::TimeSeries(series) => {
            let total: f64 = series.iter().map(|p| p.value).sum();
            format!(
                "Total sales over the selected period is {} USD.",
                format_amount(total)
            )
        }
        Aggregation::Ranking(ranking) => {
            let pairs: Vec<String> = ranking
                .iter()
                .take(SUMMARY_RANKING_LEN)
                .map(|e| format!("{}: {}", quote(&e.category), format_amount(e.value)))
                .collect();
            format!("Top sales reps and their sales: {{{}}}.", pairs.join(", "))
        }
    }
}

pub fn compose_prompt(user_query: &str, summary: &str) -> String {
    format!("{user_query} Here is a summary of the data: {summary}")
}

/// Decimal rendering that always shows a fractional part, e.g. `150.0`.
fn format_amount(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Quoted mapping key, single-quoted unless the name itself holds a single quote.
fn quote(name: &str) -> String {
    if name.contains('\'') && !name.contains('"') {
        format!("\"{}\"", name.replace('\\', "\\\\"))
    } else {
        format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{RankingEntry, TimeSeriesPoint};
    use crate::domain::sales::fixtures::date;

    fn entry(name: &str, value: f64) -> RankingEntry {
        RankingEntry::new(name.to_string(), value)
    }

    #[test]
    fn test_time_series_summary() {
        let summary = compose_summary(&Aggregation::TimeSeries(vec![
            TimeSeriesPoint::new(date("2024-01-01"), 150.0),
            TimeSeriesPoint::new(date("2024-01-02"), 30.0),
        ]));
        assert_eq!(summary, "Total sales over the selected period is 180.0 USD.");
    }

    #[test]
    fn test_empty_time_series_summary() {
        let summary = compose_summary(&Aggregation::TimeSeries(vec![]));
        assert_eq!(summary, "Total sales over the selected period is 0.0 USD.");
    }

    #[test]
    fn test_ranking_summary_quotes_top_five() {
        let ranking: Vec<_> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .enumerate()
            .map(|(i, name)| entry(name, 100.0 - i as f64 * 10.5))
            .collect();
        let summary = compose_summary(&Aggregation::Ranking(ranking));
        assert_eq!(
            summary,
            "Top sales reps and their sales: {'A': 100.0, 'B': 89.5, 'C': 79.0, 'D': 68.5, 'E': 58.0}."
        );
    }

    #[test]
    fn test_ranking_summary_quoting() {
        let summary = compose_summary(&Aggregation::Ranking(vec![entry("O'Neil", 1.25)]));
        assert_eq!(summary, "Top sales reps and their sales: {\"O'Neil\": 1.25}.");
    }

    #[test]
    fn test_prompt_contains_query_and_summary() {
        let query = "Which rep is trending up?";
        let summary = "Total sales over the selected period is 180.0 USD.";
        let prompt = compose_prompt(query, summary);

        assert!(prompt.contains(query));
        assert!(prompt.contains(summary));
        assert_eq!(prompt, compose_prompt(query, summary));
        assert_eq!(
            prompt,
            "Which rep is trending up? Here is a summary of the data: Total sales over the selected period is 180.0 USD."
        );
    }
}
