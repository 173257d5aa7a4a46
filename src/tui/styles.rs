//! Wellness color palette and styles.
//!
//! Soft pink and lilac accents on a dark background, with semantic colors
//! for the mood buckets and the two benchmark series.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{MoodBucket, Phase};

/// Wellness theme color palette.
pub struct WellnessTheme;

impl WellnessTheme {
    // === Primary Colors ===

    /// Blossom pink - Primary color
    pub const PRIMARY: Color = Color::Rgb(255, 158, 203); // #FF9ECB

    /// Lighter pink for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(255, 182, 223); // #FFB6DF

    /// Lilac for accents
    pub const ACCENT: Color = Color::Rgb(215, 124, 252); // #D77CFC

    // === Secondary Colors ===

    /// Muted plum for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(167, 139, 180); // #A78BB4

    // === Semantic Colors ===

    /// Mint - High energy
    pub const SUCCESS: Color = Color::Rgb(52, 211, 153); // #34D399

    /// Amber - Moderate
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Rose - Low energy / errors
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    // === Chart Series ===

    /// R² bars
    pub const SERIES_R_SQUARED: Color = Color::Rgb(255, 123, 191); // #FF7BBF

    /// RMSE bars
    pub const SERIES_RMSE: Color = Color::Rgb(123, 186, 255); // #7BBAFF

    // === Background ===

    pub const BG_DARK: Color = Color::Rgb(24, 16, 32); // #181020

    // === Text Colors ===

    /// Primary text (white)
    pub const TEXT_PRIMARY: Color = Color::Rgb(250, 245, 250); // #FAF5FA

    /// Secondary text
    pub const TEXT_SECONDARY: Color = Color::Rgb(196, 181, 204); // #C4B5CC

    /// Muted text
    pub const TEXT_MUTED: Color = Color::Rgb(128, 112, 140); // #80708C

    // === Preset Styles ===

    /// Style for titles
    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for subtitles
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the focused row in a list
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Text cursor in numeric fields
    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    /// Style for a mood bucket
    #[must_use]
    pub fn mood_bucket(bucket: MoodBucket) -> Style {
        match bucket {
            MoodBucket::High => Self::success(),
            MoodBucket::Moderate => Self::warning(),
            MoodBucket::Low => Self::danger(),
        }
    }

    /// Style for a cycle phase label
    #[must_use]
    pub fn phase(phase: Phase) -> Style {
        let color = match phase {
            Phase::Menstrual => Self::DANGER,
            Phase::Follicular => Self::SUCCESS,
            Phase::Ovulation => Self::PRIMARY_LIGHT,
            Phase::Luteal => Self::ACCENT,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn series_r_squared() -> Style {
        Style::default().fg(Self::SERIES_R_SQUARED)
    }

    #[must_use]
    pub fn series_rmse() -> Style {
        Style::default().fg(Self::SERIES_RMSE)
    }
}
