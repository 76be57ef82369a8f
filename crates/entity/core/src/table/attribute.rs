use bitflags::bitflags;

/// Every scalar column an entity owns in the attribute table.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum AttributeKind {
    // ========================================================================
    // Identity
    // ========================================================================
    Row = 0,
    Col = 1,
    Population = 2,
    /// 1 when the row belongs to the observing agent itself.
    SelfFlag = 3,

    // ========================================================================
    // Resources
    // ========================================================================
    Health = 4,
    Food = 5,
    Water = 6,

    // ========================================================================
    // Status
    // ========================================================================
    /// Derived PvP level; `-1` inside the safe zone.
    Wilderness = 7,
    Immune = 8,
    Freeze = 9,

    // ========================================================================
    // History
    // ========================================================================
    Damage = 10,
    TimeAlive = 11,
}

impl AttributeKind {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Only the derived wilderness level may go negative.
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Wilderness)
    }

    /// Change-set bit for this attribute.
    pub const fn mask(self) -> AttributeMask {
        AttributeMask::from_bits_retain(1 << self as u16)
    }
}

bitflags! {
    /// Tracks which attributes of one entity row changed since the last commit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AttributeMask: u16 {
        const ROW         = 1 << 0;
        const COL         = 1 << 1;
        const POPULATION  = 1 << 2;
        const SELF_FLAG   = 1 << 3;
        const HEALTH      = 1 << 4;
        const FOOD        = 1 << 5;
        const WATER       = 1 << 6;
        const WILDERNESS  = 1 << 7;
        const IMMUNE      = 1 << 8;
        const FREEZE      = 1 << 9;
        const DAMAGE      = 1 << 10;
        const TIME_ALIVE  = 1 << 11;

        const RESOURCES = Self::HEALTH.bits() | Self::FOOD.bits() | Self::WATER.bits();
        const STATUS = Self::WILDERNESS.bits() | Self::IMMUNE.bits() | Self::FREEZE.bits();
    }
}
