//! Turns one decoded feed into its contribution to the merged guide

use tracing::debug;

use crate::errors::{SourceError, SourceResult};
use crate::models::SourceContribution;
use crate::pipeline::filter::ChannelFilter;
use crate::pipeline::offset;
use crate::xmltv::element::{ATTR_START, ATTR_STOP};
use crate::xmltv::{extract_elements, parse_document};

pub struct SourceProcessor;

impl SourceProcessor {
    /// Parse `raw_xml`, keep the allowlisted channels and their programmes,
    /// and stamp `target_offset` onto every programme's `start`/`stop`.
    pub fn process(
        raw_xml: &str,
        target_offset: &str,
        allowlist: &[String],
    ) -> SourceResult<SourceContribution> {
        let root = parse_document(raw_xml).map_err(|e| SourceError::malformed(e.to_string()))?;
        let extracted = extract_elements(root);

        debug!(
            "Feed contains {} channels and {} programmes",
            extracted.channels.len(),
            extracted.programmes.len()
        );

        let filter = ChannelFilter::new(allowlist);
        let (channels, mut programmes) = filter.apply(extracted.channels, extracted.programmes);

        for programme in &mut programmes {
            for attr in [ATTR_START, ATTR_STOP] {
                let rewritten = match programme.attribute(attr) {
                    Some(value) if !value.is_empty() => offset::normalize(value, target_offset),
                    _ => continue,
                };
                programme.set_attribute(attr, rewritten);
            }
        }

        Ok(SourceContribution::new(channels, programmes))
    }
}
