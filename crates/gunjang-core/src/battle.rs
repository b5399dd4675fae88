//! Battle resolution.
//!
//! The combat relation is a static win table: for each rank, the set of
//! ranks it defeats. The relation is deliberately asymmetric and
//! non-transitive. The mine kills every ground rank yet falls to the
//! engineer and the aircraft; the flag defeats the general but not the
//! reverse; the scout defeats nothing at all.

use serde::{Deserialize, Serialize};

use crate::piece::PieceType;

/// Result of a battle between an attacking and a defending piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    AttackerWins,
    DefenderWins,
    /// Both pieces are captured.
    Draw,
}

/// The ranks `kind` defeats. Pure data, mirrored from the game's rule
/// sheet; do not derive entries at runtime.
pub fn defeats(kind: PieceType) -> &'static [PieceType] {
    use PieceType::*;
    match kind {
        Flag => &[
            General, LieutenantGeneral, LieutenantColonel, Major, FirstLieutenant,
            SecondLieutenant, WarrantOfficer, MasterSergeant, SergeantFirstClass, Sergeant,
            StaffSergeant, Corporal, PrivateFirstClass, Private, Engineer, Scout, AntiAircraft,
            Radar,
        ],
        Mine => &[
            Flag, General, LieutenantGeneral, MajorGeneral, BrigadierGeneral, Colonel,
            LieutenantColonel, Major, Captain, FirstLieutenant, SecondLieutenant, WarrantOfficer,
            MasterSergeant, SergeantFirstClass, Sergeant, StaffSergeant, Corporal,
            PrivateFirstClass, Private, Scout, Tank, AntiAircraft, Radar,
        ],
        General => &[
            LieutenantGeneral, MajorGeneral, BrigadierGeneral, Colonel, LieutenantColonel, Major,
            Captain, FirstLieutenant, SecondLieutenant, WarrantOfficer, MasterSergeant,
            SergeantFirstClass, Sergeant, StaffSergeant, Corporal, PrivateFirstClass, Private,
            Engineer, Scout, Airplane, Tank, Missile, AntiAircraft, Radar,
        ],
        LieutenantGeneral => &[
            MajorGeneral, BrigadierGeneral, Colonel, LieutenantColonel, Major, Captain,
            FirstLieutenant, SecondLieutenant, WarrantOfficer, MasterSergeant, SergeantFirstClass,
            Sergeant, StaffSergeant, Corporal, PrivateFirstClass, Private, Engineer, Scout,
            Missile, AntiAircraft, Radar,
        ],
        MajorGeneral => &[
            Flag, BrigadierGeneral, Colonel, LieutenantColonel, Major, Captain, FirstLieutenant,
            SecondLieutenant, WarrantOfficer, MasterSergeant, SergeantFirstClass, Sergeant,
            StaffSergeant, Corporal, PrivateFirstClass, Private, Engineer, Scout, Missile,
            AntiAircraft, Radar,
        ],
        BrigadierGeneral => &[
            Flag, Colonel, LieutenantColonel, Major, Captain, FirstLieutenant, SecondLieutenant,
            WarrantOfficer, MasterSergeant, SergeantFirstClass, Sergeant, StaffSergeant, Corporal,
            PrivateFirstClass, Private, Engineer, Scout, Airplane, Tank, Missile, AntiAircraft,
            Radar,
        ],
        Colonel => &[
            Flag, LieutenantColonel, Major, Captain, FirstLieutenant, SecondLieutenant,
            WarrantOfficer, MasterSergeant, SergeantFirstClass, Sergeant, StaffSergeant, Corporal,
            PrivateFirstClass, Private, Engineer, Scout, Missile, AntiAircraft, Radar,
        ],
        LieutenantColonel => &[
            Major, Captain, FirstLieutenant, SecondLieutenant, WarrantOfficer, MasterSergeant,
            SergeantFirstClass, Sergeant, StaffSergeant, Corporal, PrivateFirstClass, Private,
            Engineer, Scout, AntiAircraft, Radar,
        ],
        Major => &[
            Captain, FirstLieutenant, SecondLieutenant, WarrantOfficer, MasterSergeant,
            SergeantFirstClass, Sergeant, StaffSergeant, Corporal, PrivateFirstClass, Private,
            Engineer, Scout, AntiAircraft, Radar,
        ],
        Captain => &[
            Flag, FirstLieutenant, SecondLieutenant, WarrantOfficer, MasterSergeant,
            SergeantFirstClass, Sergeant, StaffSergeant, Corporal, PrivateFirstClass, Private,
            Engineer, Scout, AntiAircraft, Radar,
        ],
        FirstLieutenant => &[
            SecondLieutenant, WarrantOfficer, MasterSergeant, SergeantFirstClass, Sergeant,
            StaffSergeant, Corporal, PrivateFirstClass, Private, Engineer, Scout, AntiAircraft,
            Radar,
        ],
        SecondLieutenant => &[
            WarrantOfficer, MasterSergeant, SergeantFirstClass, Sergeant, StaffSergeant, Corporal,
            PrivateFirstClass, Private, Engineer, Scout, AntiAircraft, Radar,
        ],
        WarrantOfficer => &[
            MasterSergeant, SergeantFirstClass, Sergeant, StaffSergeant, Corporal,
            PrivateFirstClass, Private, Engineer, Scout, AntiAircraft, Radar,
        ],
        MasterSergeant => &[
            SergeantFirstClass, Sergeant, StaffSergeant, Corporal, PrivateFirstClass, Private,
            Engineer, Scout,
        ],
        SergeantFirstClass => &[
            Sergeant, StaffSergeant, Corporal, PrivateFirstClass, Private, Engineer, Scout,
        ],
        Sergeant => &[
            StaffSergeant, Corporal, PrivateFirstClass, Private, Engineer, Scout,
        ],
        StaffSergeant => &[Corporal, PrivateFirstClass, Private, Engineer, Scout],
        Corporal => &[PrivateFirstClass, Private, Engineer, Scout],
        PrivateFirstClass => &[Private, Engineer, Scout],
        Private => &[Engineer, Scout],
        Engineer => &[Mine, Scout, Tank, Missile, AntiAircraft, Radar],
        // The scout defeats nothing; its value is the reveal it inflicts.
        Scout => &[],
        Airplane => &[
            Flag, Mine, General, LieutenantGeneral, MajorGeneral, Colonel, LieutenantColonel,
            Major, Captain, FirstLieutenant, SecondLieutenant, WarrantOfficer, MasterSergeant,
            SergeantFirstClass, Sergeant, StaffSergeant, Corporal, PrivateFirstClass, Private,
            Engineer, Scout, Tank,
        ],
        Tank => &[
            Flag, General, LieutenantGeneral, MajorGeneral, Colonel, LieutenantColonel, Major,
            Captain, FirstLieutenant, SecondLieutenant, WarrantOfficer, MasterSergeant,
            SergeantFirstClass, Sergeant, StaffSergeant, Corporal, PrivateFirstClass, Private,
            Scout, Missile, Radar,
        ],
        Missile => &[
            Flag, Mine, LieutenantColonel, Major, Captain, FirstLieutenant, SecondLieutenant,
            WarrantOfficer, MasterSergeant, SergeantFirstClass, Sergeant, StaffSergeant, Corporal,
            PrivateFirstClass, Private, Scout, Airplane, Tank, Radar,
        ],
        AntiAircraft => &[
            MasterSergeant, SergeantFirstClass, Sergeant, StaffSergeant, Corporal,
            PrivateFirstClass, Private, Scout, Airplane, Radar,
        ],
        Radar => &[
            MasterSergeant, SergeantFirstClass, Sergeant, StaffSergeant, Corporal,
            PrivateFirstClass, Private, Scout, Airplane, Tank, Missile,
        ],
    }
}

fn can_defeat(attacker: PieceType, defender: PieceType) -> bool {
    defeats(attacker).contains(&defender)
}

/// Resolve a battle.
///
/// Mirror matchups are always a draw, independent of the win table.
/// Otherwise the table is consulted in both directions: a one-sided win
/// decides the battle, anything else (neither side listed, or a
/// contradictory table) is a draw and both pieces die.
pub fn resolve(attacker: PieceType, defender: PieceType) -> Outcome {
    if attacker == defender {
        return Outcome::Draw;
    }

    let attacker_wins = can_defeat(attacker, defender);
    let defender_wins = can_defeat(defender, attacker);

    match (attacker_wins, defender_wins) {
        (true, false) => Outcome::AttackerWins,
        (false, true) => Outcome::DefenderWins,
        _ => Outcome::Draw,
    }
}

/// Whether pieces of this rank can move at all. Only the mine is fixed.
pub fn can_move(kind: PieceType) -> bool {
    kind != PieceType::Mine
}

/// Whether this is the scout rank.
pub fn is_scout(kind: PieceType) -> bool {
    kind == PieceType::Scout
}
