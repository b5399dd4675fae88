//! Piece taxonomy: colors, ranks and the pieces themselves.

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// The two sides of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerColor {
    Red,
    Blue,
}

impl PlayerColor {
    /// The opposing color.
    pub fn opponent(self) -> PlayerColor {
        match self {
            PlayerColor::Red => PlayerColor::Blue,
            PlayerColor::Blue => PlayerColor::Red,
        }
    }

    /// Piece id prefix for this color ("R" / "B").
    pub fn id_prefix(self) -> &'static str {
        match self {
            PlayerColor::Red => "R",
            PlayerColor::Blue => "B",
        }
    }
}

/// The 27 ranks and specialists.
///
/// There is no total ordering here; the combat relation between ranks is
/// the win table in [`crate::battle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PieceType {
    // Specials
    Flag,
    Mine,
    // General officers
    General,
    LieutenantGeneral,
    MajorGeneral,
    BrigadierGeneral,
    // Field officers
    Colonel,
    LieutenantColonel,
    Major,
    // Company officers
    Captain,
    FirstLieutenant,
    SecondLieutenant,
    WarrantOfficer,
    // Non-commissioned officers
    MasterSergeant,
    SergeantFirstClass,
    Sergeant,
    // Enlisted
    StaffSergeant,
    Corporal,
    PrivateFirstClass,
    Private,
    // Special units
    Engineer,
    Scout,
    Airplane,
    Tank,
    Missile,
    AntiAircraft,
    Radar,
}

impl PieceType {
    /// Every rank, in roster order.
    pub const ALL: [PieceType; 27] = [
        PieceType::Flag,
        PieceType::Mine,
        PieceType::General,
        PieceType::LieutenantGeneral,
        PieceType::MajorGeneral,
        PieceType::BrigadierGeneral,
        PieceType::Colonel,
        PieceType::LieutenantColonel,
        PieceType::Major,
        PieceType::Captain,
        PieceType::FirstLieutenant,
        PieceType::SecondLieutenant,
        PieceType::WarrantOfficer,
        PieceType::MasterSergeant,
        PieceType::SergeantFirstClass,
        PieceType::Sergeant,
        PieceType::StaffSergeant,
        PieceType::Corporal,
        PieceType::PrivateFirstClass,
        PieceType::Private,
        PieceType::Engineer,
        PieceType::Scout,
        PieceType::Airplane,
        PieceType::Tank,
        PieceType::Missile,
        PieceType::AntiAircraft,
        PieceType::Radar,
    ];

    /// Display name.
    pub fn display_name(self) -> &'static str {
        match self {
            PieceType::Flag => "Flag",
            PieceType::Mine => "Mine",
            PieceType::General => "General",
            PieceType::LieutenantGeneral => "Lieutenant General",
            PieceType::MajorGeneral => "Major General",
            PieceType::BrigadierGeneral => "Brigadier General",
            PieceType::Colonel => "Colonel",
            PieceType::LieutenantColonel => "Lieutenant Colonel",
            PieceType::Major => "Major",
            PieceType::Captain => "Captain",
            PieceType::FirstLieutenant => "First Lieutenant",
            PieceType::SecondLieutenant => "Second Lieutenant",
            PieceType::WarrantOfficer => "Warrant Officer",
            PieceType::MasterSergeant => "Master Sergeant",
            PieceType::SergeantFirstClass => "Sergeant First Class",
            PieceType::Sergeant => "Sergeant",
            PieceType::StaffSergeant => "Staff Sergeant",
            PieceType::Corporal => "Corporal",
            PieceType::PrivateFirstClass => "Private First Class",
            PieceType::Private => "Private",
            PieceType::Engineer => "Engineer",
            PieceType::Scout => "Scout",
            PieceType::Airplane => "Airplane",
            PieceType::Tank => "Tank",
            PieceType::Missile => "Missile",
            PieceType::AntiAircraft => "Anti-Aircraft",
            PieceType::Radar => "Radar",
        }
    }

    /// Board symbol shown to the owning player.
    pub fn symbol(self) -> &'static str {
        match self {
            PieceType::Flag => "\u{2691}",
            PieceType::Mine => "\u{1F4A3}",
            PieceType::General => "\u{2605}\u{2605}\u{2605}\u{2605}",
            PieceType::LieutenantGeneral => "\u{2605}\u{2605}\u{2605}",
            PieceType::MajorGeneral => "\u{2605}\u{2605}",
            PieceType::BrigadierGeneral => "\u{2605}",
            PieceType::Colonel => "***",
            PieceType::LieutenantColonel => "**",
            PieceType::Major => "*",
            PieceType::Captain => "\u{25C7}\u{25C7}\u{25C7}",
            PieceType::FirstLieutenant => "\u{25C7}\u{25C7}",
            PieceType::SecondLieutenant => "\u{25C7}",
            PieceType::WarrantOfficer => "\u{25C6}",
            PieceType::MasterSergeant => "\u{25BD}",
            PieceType::SergeantFirstClass => "\u{FE3E}",
            PieceType::Sergeant => "\u{FE40}",
            PieceType::StaffSergeant => "\u{25A4}",
            PieceType::Corporal => "\u{2261}",
            PieceType::PrivateFirstClass => "=",
            PieceType::Private => "-",
            PieceType::Engineer => "\u{2692}",
            PieceType::Scout => "\u{1F441}",
            PieceType::Airplane => "\u{2708}",
            PieceType::Tank => "\u{25AE}",
            PieceType::Missile => "\u{1F680}",
            PieceType::AntiAircraft => "\u{26A1}",
            PieceType::Radar => "\u{1F4E1}",
        }
    }
}

/// A single piece in a room's roster.
///
/// Pieces are created once per room and mutated in place for its lifetime;
/// a defeated piece stays in the roster with `captured` set rather than
/// being removed. `position == None` means the piece is still in the
/// owner's inventory during setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: String,
    pub color: PlayerColor,
    #[serde(rename = "type")]
    pub kind: PieceType,
    pub position: Option<Position>,
    pub captured: bool,
    /// Set permanently once this piece defeats, or is defeated by, a scout.
    pub revealed: bool,
}

impl Piece {
    /// Create an unplaced piece (inventory).
    pub fn new(id: impl Into<String>, color: PlayerColor, kind: PieceType) -> Self {
        Self {
            id: id.into(),
            color,
            kind,
            position: None,
            captured: false,
            revealed: false,
        }
    }

    /// Create a piece already standing at `position`.
    pub fn at(
        id: impl Into<String>,
        color: PlayerColor,
        kind: PieceType,
        position: Position,
    ) -> Self {
        Self {
            position: Some(position),
            ..Self::new(id, color, kind)
        }
    }

    /// Whether the piece currently occupies `position` on the board.
    pub fn occupies(&self, position: &Position) -> bool {
        !self.captured
            && self
                .position
                .as_ref()
                .is_some_and(|p| p.coincides(position))
    }
}
