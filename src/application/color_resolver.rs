// Channel color resolver - Stable channel to color mapping
use crate::domain::palette::{Color, Palette};
use crate::domain::telemetry::ChannelId;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ChannelColorResolver {
    palette: Arc<Palette>,
}

impl ChannelColorResolver {
    pub fn new(palette: Arc<Palette>) -> Self {
        Self { palette }
    }

    /// Channel `n` takes palette entry `n - 1`; numbers past the end wrap
    /// around the palette and channel 0 takes the last entry. Named channels
    /// get the unassigned color.
    pub fn resolve(&self, channel: &ChannelId) -> &Color {
        match channel {
            ChannelId::Number(n) => {
                let len = self.palette.len() as u64;
                let idx = match n.checked_sub(1) {
                    Some(offset) => offset % len,
                    None => len - 1,
                };
                &self.palette.colors()[idx as usize]
            }
            ChannelId::Name(_) => self.palette.unassigned(),
        }
    }

    /// True when the channel has no palette entry of its own, so its color
    /// may repeat another channel's.
    pub fn is_overflow(&self, channel: &ChannelId) -> bool {
        match channel {
            ChannelId::Number(n) => *n == 0 || *n > self.palette.len() as u64,
            ChannelId::Name(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn resolver() -> ChannelColorResolver {
        ChannelColorResolver::new(Arc::new(Palette::default()))
    }

    #[test]
    fn test_distinct_colors_within_palette() {
        let resolver = resolver();
        let colors: HashSet<&Color> = (1..=24u64)
            .map(|n| resolver.resolve(&ChannelId::from(n)))
            .collect();
        assert_eq!(colors.len(), 24);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let resolver = resolver();
        for n in [0u64, 1, 5, 24, 25, 1000] {
            let id = ChannelId::from(n);
            assert_eq!(resolver.resolve(&id), resolver.resolve(&id));
        }
        let named = ChannelId::parse("ofdm-a");
        assert_eq!(resolver.resolve(&named), resolver.resolve(&named));
    }

    #[test]
    fn test_channel_one_takes_first_entry() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve(&ChannelId::from(1)).as_str(),
            "rgb(238, 32, 77)"
        );
        assert_eq!(
            resolver.resolve(&ChannelId::from(24)).as_str(),
            "rgb(149, 145, 140)"
        );
    }

    #[test]
    fn test_overflow_cycles_palette() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve(&ChannelId::from(25)),
            resolver.resolve(&ChannelId::from(1))
        );
        assert_eq!(
            resolver.resolve(&ChannelId::from(50)),
            resolver.resolve(&ChannelId::from(2))
        );
        assert_eq!(
            resolver.resolve(&ChannelId::from(0)),
            resolver.resolve(&ChannelId::from(24))
        );
        assert_eq!(
            resolver.resolve(&ChannelId::from(u64::MAX)),
            resolver.resolve(&ChannelId::from(u64::MAX % 24))
        );
        assert_eq!(
            resolver.resolve(&ChannelId::parse("4294967297")),
            resolver.resolve(&ChannelId::from(4_294_967_297 % 24))
        );
    }

    #[test]
    fn test_named_channel_is_unassigned() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve(&ChannelId::parse("ofdm")).as_str(),
            "rgb(128, 128, 128)"
        );
    }

    #[test]
    fn test_is_overflow() {
        let resolver = resolver();
        assert!(!resolver.is_overflow(&ChannelId::from(1)));
        assert!(!resolver.is_overflow(&ChannelId::from(24)));
        assert!(resolver.is_overflow(&ChannelId::from(25)));
        assert!(resolver.is_overflow(&ChannelId::from(0)));
        assert!(resolver.is_overflow(&ChannelId::parse("ofdm")));
    }

    #[test]
    fn test_injected_palette() {
        let colors = (1..=25).map(|n| Color::new(format!("color-{}", n))).collect();
        let palette = Palette::new(colors, Color::new("grey")).unwrap();
        let resolver = ChannelColorResolver::new(Arc::new(palette));
        assert_eq!(resolver.resolve(&ChannelId::from(2)).as_str(), "color-2");
        assert_eq!(resolver.resolve(&ChannelId::from(25)).as_str(), "color-25");
        assert_eq!(resolver.resolve(&ChannelId::from(26)).as_str(), "color-1");
        assert!(!resolver.is_overflow(&ChannelId::from(25)));
    }
}
