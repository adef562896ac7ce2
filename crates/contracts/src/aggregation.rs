//! Derived views over the current business list and the repository maps.
//! Everything here is computed on demand; nothing is persisted.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{Business, PipelineStage, PotentialLevel, VisitRecord, VisitStatus};

/// A street bucket needs this many businesses to flag the area as saturated.
pub const SATURATION_BUCKET_SIZE: usize = 15;
/// Saturation is only evaluated once the filtered list has this many entries.
pub const SATURATION_MIN_TOTAL: usize = 10;
/// A negotiation older than this many days is a forgotten opportunity.
pub const FORGOTTEN_AFTER_DAYS: i64 = 15;

const STREET_BUCKET_LEN: usize = 40;

/// Summary counts for the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineSummary {
    pub total: usize,
    pub high_potential: usize,
    pub visited: usize,
    pub negotiating: usize,
    pub closed_won: usize,
    /// round(closed_won / visited * 100), 0 when nothing was visited yet.
    pub conversion_pct: u32,
    pub pending: usize,
}

fn stage_of(stages: &HashMap<String, PipelineStage>, id: &str) -> PipelineStage {
    stages.get(id).copied().unwrap_or_default()
}

fn was_visited(visits: &HashMap<String, VisitRecord>, id: &str) -> bool {
    visits
        .get(id)
        .is_some_and(|r| r.status == VisitStatus::AlreadyVisited)
}

pub fn summarize(
    businesses: &[Business],
    potentials: &HashMap<String, PotentialLevel>,
    visits: &HashMap<String, VisitRecord>,
    stages: &HashMap<String, PipelineStage>,
) -> PipelineSummary {
    let total = businesses.len();
    let high_potential = businesses
        .iter()
        .filter(|b| potentials.get(&b.id) == Some(&PotentialLevel::High))
        .count();
    let visited = businesses.iter().filter(|b| was_visited(visits, &b.id)).count();
    let negotiating = businesses
        .iter()
        .filter(|b| stage_of(stages, &b.id) == PipelineStage::Negotiating)
        .count();
    let closed_won = businesses
        .iter()
        .filter(|b| stage_of(stages, &b.id) == PipelineStage::ClosedWon)
        .count();
    let conversion_pct = if visited > 0 {
        (closed_won as f64 / visited as f64 * 100.0).round() as u32
    } else {
        0
    };

    PipelineSummary {
        total,
        high_potential,
        visited,
        negotiating,
        closed_won,
        conversion_pct,
        pending: total - visited,
    }
}

/// Normalized "street" bucket: the first comma-delimited segment of the
/// address, lowercased and truncated.
fn street_bucket(address: &str) -> String {
    address
        .split(',')
        .next()
        .unwrap_or(address)
        .trim()
        .to_lowercase()
        .chars()
        .take(STREET_BUCKET_LEN)
        .collect()
}

/// True when some street already holds `SATURATION_BUCKET_SIZE` businesses
/// of the current filtered set. Not evaluated for very small result lists.
pub fn is_saturated(businesses: &[Business]) -> bool {
    if businesses.len() < SATURATION_MIN_TOTAL {
        return false;
    }
    let mut buckets: HashMap<String, usize> = HashMap::new();
    for b in businesses {
        *buckets.entry(street_bucket(&b.address)).or_default() += 1;
    }
    buckets.values().any(|&n| n >= SATURATION_BUCKET_SIZE)
}

/// Qualitative market density tier by result count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketDensity {
    Competitive,
    GoodDensity,
}

impl MarketDensity {
    pub fn message(&self) -> &'static str {
        match self {
            MarketDensity::Competitive => "Competitive market: lots of businesses in this area",
            MarketDensity::GoodDensity => "Good density of businesses in this area",
        }
    }
}

pub fn market_density(total: usize) -> Option<MarketDensity> {
    if total >= 15 {
        Some(MarketDensity::Competitive)
    } else if total >= 8 {
        Some(MarketDensity::GoodDensity)
    } else {
        None
    }
}

/// Businesses stuck in negotiation for more than `FORGOTTEN_AFTER_DAYS`.
pub fn forgotten_opportunities<'a>(
    businesses: &'a [Business],
    stages: &HashMap<String, PipelineStage>,
    negotiation_starts: &HashMap<String, NaiveDate>,
    today: NaiveDate,
) -> Vec<&'a Business> {
    businesses
        .iter()
        .filter(|b| stage_of(stages, &b.id) == PipelineStage::Negotiating)
        .filter(|b| {
            negotiation_starts
                .get(&b.id)
                .is_some_and(|start| (today - *start).num_days() > FORGOTTEN_AFTER_DAYS)
        })
        .collect()
}

/// Top-N ranking: potential first (high > medium > low-or-absent), then
/// provider rating, then already-visited businesses ahead of the rest.
pub fn top_opportunities<'a>(
    businesses: &'a [Business],
    potentials: &HashMap<String, PotentialLevel>,
    visits: &HashMap<String, VisitRecord>,
    n: usize,
) -> Vec<&'a Business> {
    let mut ranked: Vec<&Business> = businesses.iter().collect();
    ranked.sort_by(|a, b| {
        let pot_a = potentials.get(&a.id).map_or(1, PotentialLevel::ordinal);
        let pot_b = potentials.get(&b.id).map_or(1, PotentialLevel::ordinal);
        pot_b
            .cmp(&pot_a)
            .then_with(|| {
                let rat_a = a.rating.unwrap_or(0.0);
                let rat_b = b.rating.unwrap_or(0.0);
                rat_b.total_cmp(&rat_a)
            })
            .then_with(|| {
                let vis_a = was_visited(visits, &a.id);
                let vis_b = was_visited(visits, &b.id);
                vis_b.cmp(&vis_a)
            })
    });
    ranked.truncate(n);
    ranked
}

/// Sum of contract values over snapshot businesses currently closed-won.
pub fn pipeline_revenue(
    businesses: &[Business],
    stages: &HashMap<String, PipelineStage>,
    contract_values: &HashMap<String, u64>,
) -> u64 {
    businesses
        .iter()
        .filter(|b| stage_of(stages, &b.id) == PipelineStage::ClosedWon)
        .filter_map(|b| contract_values.get(&b.id))
        .sum()
}

/// Cities with the most worked businesses, top `n` by count descending.
pub fn top_cities(businesses: &[Business], n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for city in businesses.iter().filter_map(|b| b.city.as_deref()) {
        *counts.entry(city).or_default() += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(city, count)| (city.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
