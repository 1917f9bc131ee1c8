//! Hero catalog: immutable reference table loaded once and shared by reference.
//!
//! Lookups are case-insensitive on hero id. The hero list may be stored under
//! `heroes` or the legacy `items` key.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::effects::{EffectSummary, SkillEffect};
use crate::error::AnalyzerError;
use crate::troop::TroopType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rarity {
  Sr,
  Ssr,
  Ur,
}

impl Rarity {
  pub fn from_literal(s: &str) -> Option<Self> {
    match s {
      "SR" => Some(Self::Sr),
      "SSR" => Some(Self::Ssr),
      "UR" => Some(Self::Ur),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MechanicRole {
  Damage,
  Tank,
  Healer,
  Buffer,
  Debuffer,
  Control,
  Support,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DamageProfile {
  SingleTarget,
  Aoe,
  Mixed,
  Dot,
  Burst,
  #[default]
  Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
  Active,
  Passive,
  Ultimate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitStats {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hp_pct: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub atk_pct: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub def_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitEffect {
  pub stats: TraitStats,
  pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trait {
  pub id: String,
  pub name: String,
  pub effect: TraitEffect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
  pub id: String,
  pub name: String,
  #[serde(rename = "type")]
  pub kind: SkillType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub slot: Option<u8>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub effects: Vec<SkillEffect>,
}

/// Passive bonuses stored outside the skill list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroExtra {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default)]
  pub effects: Vec<SkillEffect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRule {
  pub to_rarity: Rarity,
  pub season: u32,
  pub permanent_if_chosen: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub trait_replaces_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub trait_gained_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
  pub id: String,
  pub name: String,
  pub rarity: Rarity,
  pub squad_type: TroopType,
  pub primary_role: MechanicRole,
  #[serde(default)]
  pub secondary_roles: Vec<MechanicRole>,
  #[serde(default)]
  pub damage_profile: DamageProfile,
  #[serde(default)]
  pub utility_tags: Vec<String>,
  pub skills: Vec<Skill>,
  #[serde(default)]
  pub inherent_trait_ids: Vec<String>,
  #[serde(default)]
  pub promotion_rules: Vec<PromotionRule>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub extras: Vec<HeroExtra>,
}

impl Hero {
  /// Every effect declared by this hero's skills and extras, in catalog order.
  pub fn effects(&self) -> impl Iterator<Item = &SkillEffect> {
    self
      .skills
      .iter()
      .flat_map(|s| s.effects.iter())
      .chain(self.extras.iter().flat_map(|e| e.effects.iter()))
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroCatalog {
  pub version: String,
  #[serde(default)]
  pub traits: Vec<Trait>,
  #[serde(alias = "items")]
  pub heroes: Vec<Hero>,
  #[serde(skip)]
  index: HashMap<String, usize>,
}

impl HeroCatalog {
  /// Catalog with no heroes; every lookup misses.
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn from_json_str(raw: &str) -> Result<Self, AnalyzerError> {
    let catalog: HeroCatalog = serde_json::from_str(raw)?;
    catalog.validated()
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
    let raw = fs::read_to_string(path)?;
    Self::from_json_str(&raw)
  }

  fn validated(mut self) -> Result<Self, AnalyzerError> {
    let mut index = HashMap::with_capacity(self.heroes.len());
    for (pos, hero) in self.heroes.iter().enumerate() {
      let key = hero.id.trim().to_lowercase();
      if key.is_empty() {
        return Err(AnalyzerError::validation("heroes[].id", "must not be empty"));
      }
      if let Some(skill) = hero.skills.iter().find(|s| matches!(s.slot, Some(n) if !(1..=4).contains(&n))) {
        return Err(AnalyzerError::catalog(format!(
          "hero {} skill {}: slot must be within 1..=4",
          hero.id, skill.id
        )));
      }
      if index.insert(key, pos).is_some() {
        return Err(AnalyzerError::catalog(format!("duplicate hero id {}", hero.id)));
      }
    }
    self.index = index;
    Ok(self)
  }

  pub fn find(&self, id: &str) -> Option<&Hero> {
    let pos = self.index.get(&id.trim().to_lowercase())?;
    self.heroes.get(*pos)
  }

  /// Effect counts over the given heroes' skills and extras. Missing or
  /// unknown ids contribute nothing.
  pub fn effect_summary<'a, I>(&self, hero_ids: I) -> EffectSummary
  where
    I: IntoIterator<Item = Option<&'a str>>,
  {
    hero_ids
      .into_iter()
      .flatten()
      .filter_map(|id| self.find(id))
      .map(|hero| {
        let mut summary = EffectSummary::default();
        for effect in hero.effects() {
          summary.add(effect);
        }
        summary
      })
      .fold(EffectSummary::default(), |acc, s| acc.merge(&s))
  }

  pub fn len(&self) -> usize {
    self.heroes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.heroes.is_empty()
  }

  pub fn listing(&self, filter: &HeroFilter) -> CatalogListing {
    let heroes: Vec<HeroListing> = self
      .heroes
      .iter()
      .filter(|h| filter.matches(h))
      .map(HeroListing::from)
      .collect();

    CatalogListing {
      ok: true,
      version: self.version.clone(),
      traits_count: self.traits.len(),
      total: heroes.len(),
      heroes,
    }
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeroFilter {
  pub rarity: Option<Rarity>,
  pub squad_type: Option<TroopType>,
}

impl HeroFilter {
  pub fn matches(&self, hero: &Hero) -> bool {
    self.rarity.map_or(true, |r| hero.rarity == r)
      && self.squad_type.map_or(true, |t| hero.squad_type == t)
  }
}

/// Summary row for catalog listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroListing {
  pub id: String,
  pub name: String,
  pub rarity: Rarity,
  pub squad_type: TroopType,
  pub primary_role: MechanicRole,
  pub secondary_roles: Vec<MechanicRole>,
  pub damage_profile: DamageProfile,
  pub has_promotion: bool,
  pub inherent_trait_ids: Vec<String>,
  pub skills_count: usize,
}

impl From<&Hero> for HeroListing {
  fn from(h: &Hero) -> Self {
    Self {
      id: h.id.clone(),
      name: h.name.clone(),
      rarity: h.rarity,
      squad_type: h.squad_type,
      primary_role: h.primary_role,
      secondary_roles: h.secondary_roles.clone(),
      damage_profile: h.damage_profile,
      has_promotion: !h.promotion_rules.is_empty(),
      inherent_trait_ids: h.inherent_trait_ids.clone(),
      skills_count: h.skills.len(),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogListing {
  pub ok: bool,
  pub version: String,
  pub traits_count: usize,
  pub total: usize,
  pub heroes: Vec<HeroListing>,
}

#[cfg(test)]
pub(crate) mod fixtures {
  pub const CATALOG_JSON: &str = r#"{
    "version": "2025.1",
    "traits": [
      {"id": "iron-will", "name": "Iron Will", "effect": {"stats": {"hpPct": 0.05}, "summary": "+5% HP"}}
    ],
    "heroes": [
      {
        "id": "kimberly", "name": "Kimberly", "rarity": "UR", "squadType": "tank",
        "primaryRole": "damage", "secondaryRoles": ["control"],
        "skills": [
          {"id": "k1", "name": "Barrage", "type": "active", "slot": 1,
           "effects": [{"key": "pctDamageUp", "target": "self", "value": "scales"}]},
          {"id": "k2", "name": "Suppress", "type": "passive",
           "effects": [{"key": "stun", "target": "enemy"}, {"key": "pctDefDown", "target": "enemies"}]}
        ],
        "promotionRules": [{"toRarity": "UR", "season": 2, "permanentIfChosen": true}]
      },
      {
        "id": "Murphy", "name": "Murphy", "rarity": "SSR", "squadType": "tank",
        "primaryRole": "tank",
        "skills": [
          {"id": "m1", "name": "Bulwark", "type": "active",
           "effects": [{"key": "shield", "target": "allies"}, {"key": "stun", "target": "enemy"}]}
        ],
        "extras": [{"effects": [{"key": "pctHpUp", "target": "squad", "value": 0.1}]}]
      },
      {
        "id": "dva", "name": "DVA", "rarity": "UR", "squadType": "air",
        "primaryRole": "damage", "damageProfile": "aoe",
        "skills": [{"id": "d1", "name": "Strafe", "type": "ultimate"}]
      }
    ]
  }"#;
}
