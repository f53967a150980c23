//! Aggregation of the selection log into the fallback-frequency numbers the
//! monitoring side alerts on.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::events::{FallbackKind, SelectionLogEntry};
use crate::scenario::Scenario;

/// Selection counters for one scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioStats {
    pub selections: usize,
    pub fallbacks: usize,
    pub terminal_fallbacks: usize,
}

impl ScenarioStats {
    /// Share of selections that went through any fallback path.
    pub fn fallback_frequency(&self) -> f64 {
        if self.selections == 0 {
            0.0
        } else {
            self.fallbacks as f64 / self.selections as f64
        }
    }
}

/// Summary over a selection log snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionStats {
    pub total_selections: usize,
    pub total_fallbacks: usize,
    pub by_scenario: HashMap<Scenario, ScenarioStats>,
    pub chosen_counts: HashMap<String, usize>,
}

impl SelectionStats {
    /// Most-chosen models, count descending then name ascending so the
    /// ordering is stable across runs.
    pub fn most_selected(&self, limit: usize) -> Vec<(String, usize)> {
        let mut sorted: Vec<(String, usize)> = self
            .chosen_counts
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        sorted.truncate(limit);
        sorted
    }
}

/// Folds a log snapshot into summary counters.
pub fn summarize(entries: &[SelectionLogEntry]) -> SelectionStats {
    let mut stats = SelectionStats::default();
    for entry in entries {
        stats.total_selections += 1;
        let scenario_stats = stats.by_scenario.entry(entry.scenario).or_default();
        scenario_stats.selections += 1;
        *stats
            .chosen_counts
            .entry(entry.chosen_model.clone())
            .or_insert(0) += 1;
        if let Some(event) = &entry.fallback_event {
            stats.total_fallbacks += 1;
            scenario_stats.fallbacks += 1;
            if event.kind == FallbackKind::TerminalLocal {
                scenario_stats.terminal_fallbacks += 1;
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::FallbackEvent;
    use chrono::Utc;

    fn make_entry(scenario: Scenario, chosen: &str, kind: Option<FallbackKind>) -> SelectionLogEntry {
        let fallback_event = kind.map(|kind| FallbackEvent {
            original_model: "gpt-4".to_string(),
            fallback_model: chosen.to_string(),
            scenario,
            excluded_models: Vec::new(),
            kind,
            agent_type: None,
            workflow_step: None,
            user_id: None,
        });
        SelectionLogEntry {
            timestamp: Utc::now(),
            scenario,
            chosen_model: chosen.to_string(),
            fallback_event,
        }
    }

    #[test]
    fn test_summarize_empty_log_is_all_zero() {
        let stats = summarize(&[]);
        assert_eq!(stats.total_selections, 0);
        assert_eq!(stats.total_fallbacks, 0);
        assert!(stats.by_scenario.is_empty());
    }

    #[test]
    fn test_summarize_counts_per_scenario() {
        let entries = vec![
            make_entry(Scenario::Chat, "qwen-turbo", None),
            make_entry(Scenario::Chat, "deepseek-chat", Some(FallbackKind::ConfiguredChain)),
            make_entry(Scenario::ResumeParsing, "ollama", Some(FallbackKind::TerminalLocal)),
        ];
        let stats = summarize(&entries);
        assert_eq!(stats.total_selections, 3);
        assert_eq!(stats.total_fallbacks, 2);

        let chat = stats.by_scenario.get(&Scenario::Chat).unwrap();
        assert_eq!(chat.selections, 2);
        assert_eq!(chat.fallbacks, 1);
        assert_eq!(chat.terminal_fallbacks, 0);

        let parsing = stats.by_scenario.get(&Scenario::ResumeParsing).unwrap();
        assert_eq!(parsing.terminal_fallbacks, 1);
    }

    #[test]
    fn test_fallback_frequency_is_fallbacks_over_selections() {
        let entries = vec![
            make_entry(Scenario::Chat, "qwen-turbo", None),
            make_entry(Scenario::Chat, "qwen-turbo", None),
            make_entry(Scenario::Chat, "deepseek-chat", Some(FallbackKind::ConfiguredChain)),
            make_entry(Scenario::Chat, "deepseek-chat", Some(FallbackKind::ConfiguredChain)),
        ];
        let stats = summarize(&entries);
        let chat = stats.by_scenario.get(&Scenario::Chat).unwrap();
        assert!((chat.fallback_frequency() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fallback_frequency_of_empty_stats_is_zero() {
        assert!((ScenarioStats::default().fallback_frequency()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_most_selected_sorts_by_count_then_name() {
        let entries = vec![
            make_entry(Scenario::Chat, "qwen-turbo", None),
            make_entry(Scenario::Chat, "qwen-turbo", None),
            make_entry(Scenario::Chat, "deepseek-chat", None),
            make_entry(Scenario::Chat, "gpt-4", None),
        ];
        let stats = summarize(&entries);
        let top = stats.most_selected(2);
        assert_eq!(top[0], ("qwen-turbo".to_string(), 2));
        assert_eq!(top[1], ("deepseek-chat".to_string(), 1));
    }
}
