//! Channel allowlist filtering

use std::collections::HashSet;

use crate::xmltv::Element;

/// Restricts a feed to an allowlist of channel ids
///
/// An empty allowlist keeps everything. Otherwise a programme survives only
/// when its `channel` is allowlisted *and* that channel was actually present
/// in the same feed, so programmes never reference a channel the feed did
/// not contribute.
#[derive(Debug, Clone, Default)]
pub struct ChannelFilter {
    allowed: HashSet<String>,
}

impl ChannelFilter {
    pub fn new(allowlist: &[String]) -> Self {
        Self {
            allowed: allowlist.iter().cloned().collect(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.allowed.is_empty()
    }

    /// Filter channels and programmes, preserving input order
    pub fn apply(
        &self,
        channels: Vec<Element>,
        programmes: Vec<Element>,
    ) -> (Vec<Element>, Vec<Element>) {
        if !self.is_active() {
            return (channels, programmes);
        }

        let retained_channels: Vec<Element> = channels
            .into_iter()
            .filter(|channel| {
                channel
                    .channel_id()
                    .is_some_and(|id| self.allowed.contains(id))
            })
            .collect();

        let retained_ids: HashSet<&str> = retained_channels
            .iter()
            .filter_map(Element::channel_id)
            .collect();

        let retained_programmes = programmes
            .into_iter()
            .filter(|programme| {
                programme
                    .programme_channel()
                    .is_some_and(|id| self.allowed.contains(id) && retained_ids.contains(id))
            })
            .collect();

        (retained_channels, retained_programmes)
    }
}
