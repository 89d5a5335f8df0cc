// 📐 Responsive breakpoints
// Minimum widths match the dashboard's layout grid (Tailwind defaults)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Breakpoint {
    /// Below `sm`
    Base,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

impl Breakpoint {
    /// Ascending order, used for width lookups
    pub const ALL: [Breakpoint; 6] = [
        Breakpoint::Base,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
    ];

    pub fn min_width(&self) -> u32 {
        match self {
            Breakpoint::Base => 0,
            Breakpoint::Sm => 640,
            Breakpoint::Md => 768,
            Breakpoint::Lg => 1024,
            Breakpoint::Xl => 1280,
            Breakpoint::Xxl => 1536,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Base => "base",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "2xl",
        }
    }

    /// Largest breakpoint whose minimum width fits the viewport
    pub fn from_width(width: u32) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|bp| width >= bp.min_width())
            .unwrap_or(Breakpoint::Base)
    }

    pub fn is_at_least(width: u32, breakpoint: Breakpoint) -> bool {
        width >= breakpoint.min_width()
    }
}

/// Phones and narrow tablets get the stacked layout
pub fn is_mobile(width: u32) -> bool {
    !Breakpoint::is_at_least(width, Breakpoint::Md)
}
