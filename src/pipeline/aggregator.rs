//! Cross-source accumulation with channel deduplication

use std::collections::HashSet;

use crate::models::{AggregatedDocument, SourceContribution};
use crate::xmltv::Element;

/// Counts from a single [`MergeAggregator::add_source`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub channels_added: usize,
    pub duplicate_channels: usize,
    pub programmes_added: usize,
}

/// Accumulates source contributions for one run
///
/// The first channel seen for an id wins; later channels with the same id
/// are dropped whole. Programmes are concatenated as-is, duplicates included.
#[derive(Debug, Default)]
pub struct MergeAggregator {
    channels: Vec<Element>,
    programmes: Vec<Element>,
    seen_ids: HashSet<String>,
}

impl MergeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(&mut self, contribution: SourceContribution) -> MergeStats {
        let mut stats = MergeStats::default();

        for channel in contribution.channels {
            // Channels without an id cannot be deduplicated
            let Some(id) = channel.channel_id() else {
                stats.duplicate_channels += 1;
                continue;
            };

            if self.seen_ids.insert(id.to_string()) {
                self.channels.push(channel);
                stats.channels_added += 1;
            } else {
                stats.duplicate_channels += 1;
            }
        }

        stats.programmes_added = contribution.programmes.len();
        self.programmes.extend(contribution.programmes);

        stats
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn programme_count(&self) -> usize {
        self.programmes.len()
    }

    pub fn finalize(self) -> AggregatedDocument {
        AggregatedDocument {
            channels: self.channels,
            programmes: self.programmes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xmltv::element::{ATTR_CHANNEL, ATTR_ID, TAG_CHANNEL, TAG_PROGRAMME};
    use crate::xmltv::Node;

    fn channel(id: &str, label: &str) -> Element {
        Element::new(TAG_CHANNEL)
            .with_attribute(ATTR_ID, id)
            .with_child(Node::Text(label.to_string()))
    }

    fn programme(channel: &str) -> Element {
        Element::new(TAG_PROGRAMME).with_attribute(ATTR_CHANNEL, channel)
    }

    #[test]
    fn test_first_channel_wins() {
        let mut aggregator = MergeAggregator::new();

        let first = aggregator.add_source(SourceContribution::new(vec![channel("c1", "from A")], vec![]));
        let second = aggregator.add_source(SourceContribution::new(
            vec![channel("c2", "from B"), channel("c1", "from B")],
            vec![],
        ));

        assert_eq!(first.channels_added, 1);
        assert_eq!(second.channels_added, 1);
        assert_eq!(second.duplicate_channels, 1);

        let doc = aggregator.finalize();
        assert_eq!(doc.channels, vec![channel("c1", "from A"), channel("c2", "from B")]);
    }

    #[test]
    fn test_first_channel_attributes_survive() {
        let from_a = channel("c1", "One").with_attribute("lang", "es");
        let from_b = Element::new(TAG_CHANNEL)
            .with_attribute(ATTR_ID, "c1")
            .with_attribute("lang", "en")
            .with_attribute("source", "b")
            .with_child(Node::Text("One".to_string()));

        let mut aggregator = MergeAggregator::new();
        aggregator.add_source(SourceContribution::new(vec![from_a.clone()], vec![]));
        let stats = aggregator.add_source(SourceContribution::new(vec![from_b], vec![]));
        assert_eq!(stats.duplicate_channels, 1);

        let doc = aggregator.finalize();
        assert_eq!(doc.channels, vec![from_a]);
        assert_eq!(doc.channels[0].attribute("lang"), Some("es"));
        assert_eq!(doc.channels[0].attribute("source"), None);
    }

    #[test]
    fn test_programmes_are_concatenated_without_dedup() {
        let mut aggregator = MergeAggregator::new();
        aggregator.add_source(SourceContribution::new(vec![], vec![programme("c1"), programme("c1")]));
        let stats = aggregator.add_source(SourceContribution::new(vec![], vec![programme("c1")]));

        assert_eq!(stats.programmes_added, 1);
        assert_eq!(aggregator.programme_count(), 3);
        assert_eq!(aggregator.finalize().programme_count(), 3);
    }

    #[test]
    fn test_channel_without_id_is_discarded() {
        let mut aggregator = MergeAggregator::new();
        let stats = aggregator.add_source(SourceContribution::new(
            vec![Element::new(TAG_CHANNEL), channel("c1", "x")],
            vec![],
        ));

        assert_eq!(stats.channels_added, 1);
        assert_eq!(aggregator.channel_count(), 1);
    }

    #[test]
    fn test_empty_aggregator_finalizes_empty() {
        let doc = MergeAggregator::new().finalize();
        assert_eq!(doc, AggregatedDocument::default());
    }
}
