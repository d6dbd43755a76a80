use crate::class::Breaks;

/// Statistical geographic unit an indicator layer is published at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialUnit {
    /// Destination zone (employment data).
    Dzn,
    /// Statistical area level 1.
    Sa1,
    /// Mesh block.
    Mb,
}

impl SpatialUnit {
    pub fn label(self) -> &'static str {
        match self {
            SpatialUnit::Dzn => "DZN",
            SpatialUnit::Sa1 => "SA1",
            SpatialUnit::Mb => "MB",
        }
    }
}

/// How an indicator's class breaks are obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreakPolicy {
    Fixed(Breaks),
    /// Quarters of the global maximum observed across all years and zones.
    QuartersOfMax,
    /// Equal-interval fifths of 0..global maximum.
    FifthsOfMax,
}

impl BreakPolicy {
    /// Resolve to concrete breaks. Dynamic policies need the global maximum,
    /// precomputed by the caller from the full multi-year dataset; without
    /// it they cannot be resolved.
    pub fn resolve(self, global_max: Option<f64>) -> Option<Breaks> {
        match self {
            BreakPolicy::Fixed(breaks) => Some(breaks),
            BreakPolicy::QuartersOfMax => global_max.map(Breaks::quarters_of),
            BreakPolicy::FifthsOfMax => global_max.map(|max| Breaks::equal_interval(0.0, max)),
        }
    }
}

/// The indicators the dashboard can overlay. Each is tied to a zone layer
/// granularity, per-year value/code property names, and a break policy.
/// Dataset file selection stays with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Jobs,
    IndustrySpecialisation,
    SocialInfrastructure,
    HousingStress,
    LandUseMix,
    AgeDiversity,
    IncomeDiversity,
    Walkability,
    Residents,
    Dwellings,
    ResidentsSa1,
}

impl Indicator {
    /// Route a free-text indicator query to the catalog. Matching mirrors
    /// the dashboard's keyword rules; unrecognized queries default to jobs.
    pub fn from_query(query: &str) -> Indicator {
        let q = query.to_lowercase();
        let has = |needle: &str| q.contains(needle);

        if has("spec") || has("industry") {
            Indicator::IndustrySpecialisation
        } else if (has("social") && has("infra")) || (has("accessibility") && has("social")) {
            Indicator::SocialInfrastructure
        } else if has("housing") && (has("stress") || has("percent")) {
            Indicator::HousingStress
        } else if (has("land") && has("mix")) || has("lum") {
            Indicator::LandUseMix
        } else if has("age") && (has("diversity") || has("resident")) {
            Indicator::AgeDiversity
        } else if has("income") && (has("diversity") || has("resident")) {
            Indicator::IncomeDiversity
        } else if has("walk") {
            Indicator::Walkability
        } else if has("resident") && has("sa1") {
            Indicator::ResidentsSa1
        } else if has("dwell") {
            Indicator::Dwellings
        } else if has("resident") || has("mesh") {
            Indicator::Residents
        } else {
            Indicator::Jobs
        }
    }

    /// Human-readable label, as shown in the dashboard legend.
    pub fn label(self) -> &'static str {
        match self {
            Indicator::Jobs => "Number of jobs",
            Indicator::IndustrySpecialisation => "Industry specialisation",
            Indicator::SocialInfrastructure => "Accessibility of social infrastructure",
            Indicator::HousingStress => "Housing stress",
            Indicator::LandUseMix => "Land use mix",
            Indicator::AgeDiversity => "Diversity of residents' age",
            Indicator::IncomeDiversity => "Diversity of residents' income",
            Indicator::Walkability => "Walkability",
            Indicator::Residents => "Number of residents",
            Indicator::Dwellings => "Number of dwellings",
            Indicator::ResidentsSa1 => "Number of residents (SA1)",
        }
    }

    pub fn spatial_unit(self) -> SpatialUnit {
        match self {
            Indicator::Jobs | Indicator::IndustrySpecialisation => SpatialUnit::Dzn,
            Indicator::Residents | Indicator::Dwellings => SpatialUnit::Mb,
            _ => SpatialUnit::Sa1,
        }
    }

    /// Clamp a requested census year to the years this indicator is
    /// published for. The 2018/2021 layers coerce everything else to 2018;
    /// census-year layers pass the year through (an unsupported year then
    /// resolves to no property names at all).
    pub fn coerce_year(self, year: i32) -> i32 {
        match self {
            Indicator::SocialInfrastructure | Indicator::HousingStress | Indicator::Walkability => {
                if year == 2021 { 2021 } else { 2018 }
            }
            _ => year,
        }
    }

    /// Property holding the indicator value for the given year, if published.
    pub fn value_property(self, year: i32) -> Option<&'static str> {
        match (self, self.coerce_year(year)) {
            (Indicator::Jobs, 2011) => Some("TotJob_11"),
            (Indicator::Jobs, 2016) => Some("TotJob_16"),
            (Indicator::Jobs, 2021) => Some("TotJob_21"),
            (Indicator::IndustrySpecialisation, 2011) => Some("Special_11"),
            (Indicator::IndustrySpecialisation, 2016) => Some("Special_16"),
            (Indicator::IndustrySpecialisation, 2021) => Some("Special_21"),
            (Indicator::SocialInfrastructure, 2018) => Some("SoInfra_18"),
            (Indicator::SocialInfrastructure, 2021) => Some("SoInfra_21"),
            (Indicator::HousingStress, 2018) => Some("HouStre_18"),
            (Indicator::HousingStress, 2021) => Some("HouStre_21"),
            (Indicator::LandUseMix, 2011) => Some("LUM_11"),
            (Indicator::LandUseMix, 2016) => Some("LUM_16"),
            (Indicator::LandUseMix, 2021) => Some("LUM_21"),
            (Indicator::AgeDiversity, 2016) => Some("Age_Mix_16"),
            (Indicator::AgeDiversity, 2021) => Some("Age_Mix_21"),
            (Indicator::IncomeDiversity, 2016) => Some("Inc_Mix_16"),
            (Indicator::IncomeDiversity, 2021) => Some("Inc_Mix_21"),
            (Indicator::Walkability, 2018) => Some("Walkabi_18"),
            (Indicator::Walkability, 2021) => Some("Walkabi_21"),
            (Indicator::Residents | Indicator::ResidentsSa1, 2011) => Some("Person_11"),
            (Indicator::Residents | Indicator::ResidentsSa1, 2016) => Some("Person_16"),
            (Indicator::Residents | Indicator::ResidentsSa1, 2021) => Some("Person_21"),
            (Indicator::Dwellings, 2011) => Some("Dwell_11"),
            (Indicator::Dwellings, 2016) => Some("Dwell_16"),
            (Indicator::Dwellings, 2021) => Some("Dwell_21"),
            _ => None,
        }
    }

    /// Property holding the zone's identifying code for the given year.
    /// SA1 layers share one code column; DZN and MB codes are per-census.
    pub fn code_property(self, year: i32) -> Option<&'static str> {
        match self.spatial_unit() {
            SpatialUnit::Sa1 => Some("SA1_CODE_2"),
            SpatialUnit::Dzn => match year {
                2011 => Some("DZN_CODE11"),
                2016 => Some("DZN_CODE16"),
                2021 => Some("DZN_CODE21"),
                _ => None,
            },
            SpatialUnit::Mb => match year {
                2011 => Some("MB_CODE11"),
                2016 => Some("MB_CODE16"),
                2021 => Some("MB_CODE21"),
                _ => None,
            },
        }
    }

    /// Classification policy. Index-valued indicators use fixed breaks over
    /// [0, 1]; scored/percentage indicators use equal intervals over their
    /// published domain; jobs and SA1 residents scale to the global maximum.
    pub fn break_policy(self) -> BreakPolicy {
        match self {
            Indicator::Jobs => BreakPolicy::QuartersOfMax,
            Indicator::ResidentsSa1 => BreakPolicy::FifthsOfMax,
            Indicator::IndustrySpecialisation
            | Indicator::LandUseMix
            | Indicator::AgeDiversity
            | Indicator::IncomeDiversity => BreakPolicy::Fixed(Breaks::fixed([0.2, 0.4, 0.6, 0.8])),
            Indicator::SocialInfrastructure => BreakPolicy::Fixed(Breaks::equal_interval(0.0, 16.0)),
            Indicator::HousingStress => BreakPolicy::Fixed(Breaks::equal_interval(0.0, 100.0)),
            Indicator::Walkability => BreakPolicy::Fixed(Breaks::equal_interval(-2.8, 8.0)),
            Indicator::Residents => BreakPolicy::Fixed(Breaks::fixed([50.0, 100.0, 200.0, 400.0])),
            Indicator::Dwellings => BreakPolicy::Fixed(Breaks::fixed([20.0, 50.0, 100.0, 200.0])),
        }
    }
}
