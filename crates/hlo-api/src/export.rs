//! Character export format
//!
//! A character export is a versioned document. With a baseline of 0 it is a
//! full export; otherwise it is differential and only contains what changed
//! since the baseline, plus the `deletedItems` / `movedItems` /
//! `deletedActors` sections describing removals and moves.
//!
//! The format is mostly game-agnostic. Game-specific actor values stay as
//! raw JSON in `Actor::game_values` and can be decoded on demand into
//! `StarfinderGameValues` or `Pathfinder2GameValues`. Game-specific item
//! properties are preserved in `Item::extra`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Id of the primary character. Always present in a full export and never
/// deleted.
pub const LEAD_ACTOR_ID: &str = "actor.1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterExport {
    pub portfolio: Portfolio,
    /// Only included in full exports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub actors: BTreeMap<String, Actor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_items: Option<BTreeMap<String, DeletedItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moved_items: Option<BTreeMap<String, MovedItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_actors: Option<Vec<String>>,
}

impl CharacterExport {
    /// Revision of the character at export time.
    pub fn version(&self) -> u64 {
        self.portfolio.version
    }

    /// Whether this export only reports changes since a baseline.
    pub fn is_differential(&self) -> bool {
        self.portfolio.baseline != 0
    }

    /// The primary character. `None` only for a differential export in which
    /// the lead actor did not change.
    pub fn lead_actor(&self) -> Option<&Actor> {
        self.actors.get(LEAD_ACTOR_ID)
    }

    pub fn actor(&self, id: &str) -> Option<&Actor> {
        self.actors.get(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    /// Unique identifier of the character within HLO.
    pub char_id: String,
    /// Increases whenever the character is modified.
    pub version: u64,
    /// Revision the differential export is relative to; 0 for a full export.
    #[serde(default)]
    pub baseline: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub game_code: String,
    pub game_name: String,
    /// Differential exports across a major version change are unreliable.
    pub game_major: u32,
    pub game_minor: u32,
    pub hlo_version: u32,
    pub export_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub game_values: serde_json::Value,
    #[serde(default)]
    pub items: BTreeMap<String, Item>,
}

impl Actor {
    /// Decode the game-specific values into a typed view.
    pub fn game_values_as<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.game_values)
    }
}

/// An ability, skill, piece of gear or other element of an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub summary: String,
    /// Grouping shared by related items (all skills, all ability scores...).
    #[serde(default)]
    pub compset: String,
    /// Items held within this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<BTreeMap<String, Item>>,
    /// Set on nested items only.
    #[serde(rename = "Containment", default, skip_serializing_if = "Option::is_none")]
    pub containment: Option<Containment>,
    /// Game-specific properties.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Containment {
    /// Mounted for use, e.g. ammo or a battery.
    Installed,
    /// Placed in the container for storage.
    Stored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedItem {
    /// Containing item; `None` when deleted directly from the actor.
    #[serde(default)]
    pub from_item: Option<String>,
    pub from_actor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovedItem {
    #[serde(default)]
    pub from_item: Option<String>,
    pub from_actor: String,
    #[serde(default)]
    pub to_item: Option<String>,
    pub to_actor: String,
}

/// Actor size ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Size {
    Fine = -4,
    Diminutive = -3,
    Tiny = -2,
    Small = -1,
    Medium = 0,
    Large = 1,
    Huge = 2,
    Gargantuan = 3,
    Colossal = 4,
}

impl Size {
    pub fn from_rating(rating: i64) -> Option<Self> {
        Some(match rating {
            -4 => Size::Fine,
            -3 => Size::Diminutive,
            -2 => Size::Tiny,
            -1 => Size::Small,
            0 => Size::Medium,
            1 => Size::Large,
            2 => Size::Huge,
            3 => Size::Gargantuan,
            4 => Size::Colossal,
            _ => return None,
        })
    }
}

/// Net encumbrance ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CarryingLevel {
    Unencumbered = 0,
    Encumbered = 1,
    Overburdened = 2,
}

impl CarryingLevel {
    pub fn from_rating(rating: i64) -> Option<Self> {
        Some(match rating {
            0 => CarryingLevel::Unencumbered,
            1 => CarryingLevel::Encumbered,
            2 => CarryingLevel::Overburdened,
            _ => return None,
        })
    }
}

/// Actor values for the Starfinder game system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfinderGameValues {
    /// Challenge rating; 0 = 1/2, -1 = 1/3, -2 = 1/4.
    #[serde(rename = "actCR")]
    pub act_cr: i64,
    #[serde(rename = "actXPAward")]
    pub act_xp_award: i64,
    #[serde(rename = "actSize")]
    pub act_size: i64,
    #[serde(rename = "actSizeWeapon")]
    pub act_size_weapon: i64,
    #[serde(rename = "actCarryingLevel")]
    pub act_carrying_level: i64,
    #[serde(rename = "actEncumbered")]
    pub act_encumbered: f64,
    #[serde(rename = "actOverburdened")]
    pub act_overburdened: f64,
    #[serde(rename = "actLevel")]
    pub act_level: i64,
    #[serde(rename = "actLevelNet")]
    pub act_level_net: i64,
    #[serde(rename = "actSocietyId")]
    pub act_society_id: i64,
    #[serde(rename = "actSocietyChar")]
    pub act_society_char: i64,
    #[serde(rename = "actFameNet")]
    pub act_fame_net: i64,
}

impl StarfinderGameValues {
    pub fn size(&self) -> Option<Size> {
        Size::from_rating(self.act_size)
    }

    pub fn carrying_level(&self) -> Option<CarryingLevel> {
        CarryingLevel::from_rating(self.act_carrying_level)
    }
}

/// Actor values for the Pathfinder 2 game system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pathfinder2GameValues {
    #[serde(rename = "actSize")]
    pub act_size: i64,
    #[serde(rename = "actCarryingLevel")]
    pub act_carrying_level: i64,
}

impl Pathfinder2GameValues {
    pub fn size(&self) -> Option<Size> {
        Size::from_rating(self.act_size)
    }

    pub fn carrying_level(&self) -> Option<CarryingLevel> {
        CarryingLevel::from_rating(self.act_carrying_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn differential() -> CharacterExport {
        serde_json::from_value(serde_json::json!({
            "portfolio": {"charId": "unittest", "version": 12, "baseline": 10},
            "actors": {
                "actor.1": {
                    "name": "Unit Test",
                    "player": "Unit Tester",
                    "gameValues": {"actSize": 0},
                    "items": {
                        "backpack.1": {
                            "name": "Backpack",
                            "compset": "Gear",
                            "grBulk": 1,
                            "items": {
                                "ration.3": {"name": "Ration", "Containment": "Stored"}
                            }
                        }
                    }
                }
            },
            "deletedItems": {"rope.2": {"fromItem": null, "fromActor": "actor.1"}},
            "movedItems": {
                "ration.3": {"fromItem": null, "fromActor": "actor.1", "toItem": "backpack.1", "toActor": "actor.1"}
            },
            "deletedActors": ["actor.2"]
        }))
        .unwrap()
    }

    #[test]
    fn differential_export_sections_parse() {
        let export = differential();
        assert!(export.is_differential());
        assert_eq!(export.version(), 12);
        assert!(export.metadata.is_none());
        assert_eq!(export.deleted_actors.as_deref(), Some(&["actor.2".to_string()][..]));

        let deleted = &export.deleted_items.as_ref().unwrap()["rope.2"];
        assert_eq!(deleted.from_item, None);
        assert_eq!(deleted.from_actor, "actor.1");

        let moved = &export.moved_items.as_ref().unwrap()["ration.3"];
        assert_eq!(moved.to_item.as_deref(), Some("backpack.1"));
    }

    #[test]
    fn nested_items_keep_containment_and_game_properties() {
        let export = differential();
        let lead = export.lead_actor().unwrap();
        let backpack = &lead.items["backpack.1"];
        assert_eq!(backpack.extra["grBulk"], 1);
        assert!(backpack.containment.is_none());

        let ration = &backpack.items.as_ref().unwrap()["ration.3"];
        assert_eq!(ration.containment, Some(Containment::Stored));
        assert!(ration.extra.is_empty());
    }

    #[test]
    fn game_values_decode_on_demand() {
        let actor: Actor = serde_json::from_value(serde_json::json!({
            "name": "Vesk",
            "player": "P",
            "gameValues": {"actCR": -1, "actSize": 1, "actCarryingLevel": 2, "actEncumbered": 7.5},
            "items": {}
        }))
        .unwrap();
        let values: StarfinderGameValues = actor.game_values_as().unwrap();
        assert_eq!(values.act_cr, -1);
        assert_eq!(values.size(), Some(Size::Large));
        assert_eq!(values.carrying_level(), Some(CarryingLevel::Overburdened));
        assert_eq!(values.act_encumbered, 7.5);
    }

    #[test]
    fn out_of_range_ratings_are_none() {
        assert_eq!(Size::from_rating(5), None);
        assert_eq!(Size::from_rating(-4), Some(Size::Fine));
        assert_eq!(CarryingLevel::from_rating(3), None);
        assert!(Size::Small < Size::Medium);
    }
}
