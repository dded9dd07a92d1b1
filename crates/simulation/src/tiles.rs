//! Static tile catalog.
//!
//! Every [`TileType`] maps to exactly one immutable [`TileData`] record. The
//! [`TileCatalog`] resource is built once at plugin setup and resolves each
//! tile's [`TileCategory`] up front, so per-tick code never re-derives category
//! membership.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Building kinds a cell can hold. `Empty` is the unbuilt marker.
///
/// The discriminant is the stable wire code used by the save format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
    Default,
)]
#[repr(u8)]
pub enum TileType {
    #[default]
    Empty = 0,
    Road,

    // Residential
    ResidentialTiny,
    Residential,
    ResidentialSuburb,
    ResidentialApartments,
    ResidentialHigh,
    ResidentialLuxury,
    ResidentialArcology,

    // Commercial
    CommercialStall,
    Commercial,
    CommercialMall,
    CommercialHigh,
    OfficeTower,
    TechCampus,
    MegaCasino,

    // Industrial
    Farm,
    IndustrialWorkshop,
    Industrial,
    IndustrialHigh,
    BioTechLab,
    AutomatedFactory,
    AerospaceHangar,

    // Power
    PowerWind,
    PowerCoal,
    PowerSolar,
    PowerBiomass,
    PowerGeothermal,
    PowerNuclear,
    PowerFusion,

    // Water
    WaterTower,
    WaterTreatment,
    Desalination,

    // Civic services
    Police,
    PoliceHq,
    FireStation,
    FireHq,
    Clinic,
    Hospital,
    MedicalCenter,
    School,
    Library,
    HighSchool,
    University,
    ResearchLab,

    // Leisure
    ParkSmall,
    DogPark,
    ParkLarge,
    Museum,
    ArtGallery,
    Stadium,
    ThemePark,
    VrPlaza,

    // Transport and infrastructure
    Subway,
    Airport,
    Recycling,
    MaglevStation,
    SpacePort,
}

/// Number of [`TileType`] variants, including `Empty`.
pub const TILE_TYPE_COUNT: usize = TileType::ALL.len();

impl TileType {
    /// Every variant in wire-code order.
    pub const ALL: [TileType; 58] = [
        TileType::Empty,
        TileType::Road,
        TileType::ResidentialTiny,
        TileType::Residential,
        TileType::ResidentialSuburb,
        TileType::ResidentialApartments,
        TileType::ResidentialHigh,
        TileType::ResidentialLuxury,
        TileType::ResidentialArcology,
        TileType::CommercialStall,
        TileType::Commercial,
        TileType::CommercialMall,
        TileType::CommercialHigh,
        TileType::OfficeTower,
        TileType::TechCampus,
        TileType::MegaCasino,
        TileType::Farm,
        TileType::IndustrialWorkshop,
        TileType::Industrial,
        TileType::IndustrialHigh,
        TileType::BioTechLab,
        TileType::AutomatedFactory,
        TileType::AerospaceHangar,
        TileType::PowerWind,
        TileType::PowerCoal,
        TileType::PowerSolar,
        TileType::PowerBiomass,
        TileType::PowerGeothermal,
        TileType::PowerNuclear,
        TileType::PowerFusion,
        TileType::WaterTower,
        TileType::WaterTreatment,
        TileType::Desalination,
        TileType::Police,
        TileType::PoliceHq,
        TileType::FireStation,
        TileType::FireHq,
        TileType::Clinic,
        TileType::Hospital,
        TileType::MedicalCenter,
        TileType::School,
        TileType::Library,
        TileType::HighSchool,
        TileType::University,
        TileType::ResearchLab,
        TileType::ParkSmall,
        TileType::DogPark,
        TileType::ParkLarge,
        TileType::Museum,
        TileType::ArtGallery,
        TileType::Stadium,
        TileType::ThemePark,
        TileType::VrPlaza,
        TileType::Subway,
        TileType::Airport,
        TileType::Recycling,
        TileType::MaglevStation,
        TileType::SpacePort,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`TileType::code`]. Unknown codes yield `None`.
    pub fn from_code(code: u8) -> Option<TileType> {
        TileType::ALL.get(code as usize).copied()
    }

    pub fn is_empty(self) -> bool {
        self == TileType::Empty
    }

    pub fn category(self) -> TileCategory {
        use TileType::*;
        match self {
            Empty => TileCategory::Empty,
            Road => TileCategory::Road,
            ResidentialTiny | Residential | ResidentialSuburb | ResidentialApartments
            | ResidentialHigh | ResidentialLuxury | ResidentialArcology => {
                TileCategory::Residential
            }
            CommercialStall | Commercial | CommercialMall | CommercialHigh | OfficeTower
            | TechCampus | MegaCasino => TileCategory::Commercial,
            Farm | IndustrialWorkshop | Industrial | IndustrialHigh | BioTechLab
            | AutomatedFactory | AerospaceHangar => TileCategory::Industrial,
            PowerWind | PowerCoal | PowerSolar | PowerBiomass | PowerGeothermal | PowerNuclear
            | PowerFusion => TileCategory::Power,
            WaterTower | WaterTreatment | Desalination => TileCategory::Water,
            Police | PoliceHq | FireStation | FireHq | Clinic | Hospital | MedicalCenter
            | School | Library | HighSchool | University | ResearchLab => TileCategory::Civic,
            ParkSmall | DogPark | ParkLarge | Museum | ArtGallery | Stadium | ThemePark
            | VrPlaza => TileCategory::Leisure,
            Subway | Airport | Recycling | MaglevStation | SpacePort => TileCategory::Transport,
        }
    }

    pub fn name(self) -> &'static str {
        use TileType::*;
        match self {
            Empty => "Cleared Land",
            Road => "Road",
            ResidentialTiny => "Small Houses",
            Residential => "Basic Houses",
            ResidentialSuburb => "Suburban Homes",
            ResidentialApartments => "Apartments",
            ResidentialHigh => "Apartment Block",
            ResidentialLuxury => "Luxury Tower",
            ResidentialArcology => "Arcology",
            CommercialStall => "Street Stall",
            Commercial => "Local Shops",
            CommercialMall => "Shopping Mall",
            CommercialHigh => "Business District",
            OfficeTower => "Office Tower",
            TechCampus => "Tech Campus",
            MegaCasino => "Mega Casino",
            Farm => "Eco Farm",
            IndustrialWorkshop => "Workshop",
            Industrial => "Industry",
            IndustrialHigh => "Mega Factory",
            BioTechLab => "Bio-Tech Lab",
            AutomatedFactory => "AI Factory",
            AerospaceHangar => "Aerospace Hangar",
            PowerWind => "Wind Turbine",
            PowerCoal => "Coal Plant",
            PowerSolar => "Solar Farm",
            PowerBiomass => "Biomass Plant",
            PowerGeothermal => "Geothermal Plant",
            PowerNuclear => "Fission Reactor",
            PowerFusion => "Fusion Reactor",
            WaterTower => "Water Tower",
            WaterTreatment => "Water Treatment",
            Desalination => "Desalination Plant",
            Police => "Police Station",
            PoliceHq => "Police HQ",
            FireStation => "Fire Station",
            FireHq => "Fire HQ",
            Clinic => "Clinic",
            Hospital => "Hospital",
            MedicalCenter => "Medical Center",
            School => "Primary School",
            Library => "Library",
            HighSchool => "High School",
            University => "University",
            ResearchLab => "R&D Center",
            ParkSmall => "Plaza",
            DogPark => "Dog Park",
            ParkLarge => "Central Park",
            Museum => "National Museum",
            ArtGallery => "Art Gallery",
            Stadium => "Olympic Stadium",
            ThemePark => "Theme Park",
            VrPlaza => "VR Plaza",
            Subway => "Subway Station",
            Airport => "International Airport",
            Recycling => "Recycling Center",
            MaglevStation => "Maglev Station",
            SpacePort => "Space Port",
        }
    }
}

/// Explicit grouping of tile types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileCategory {
    Empty,
    Road,
    Residential,
    Commercial,
    Industrial,
    Power,
    Water,
    Civic,
    Leisure,
    Transport,
}

impl TileCategory {
    /// Tiles in this category only operate with road access.
    pub fn is_road_sensitive(self) -> bool {
        !matches!(
            self,
            TileCategory::Empty | TileCategory::Road | TileCategory::Power | TileCategory::Water
        )
    }

    pub fn is_power_producer(self) -> bool {
        self == TileCategory::Power
    }

    pub fn is_water_producer(self) -> bool {
        self == TileCategory::Water
    }
}

/// Economic and environmental coefficients for one tile type.
///
/// Sign convention for `power` and `water`: negative values are generation
/// capacity contributed, positive values are consumption demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileData {
    pub tile: TileType,
    pub category: TileCategory,
    pub cost: i64,
    pub unlock_level: u32,
    pub power: i32,
    /// Carried for completeness; no derived stat consumes it.
    pub water: i32,
    pub income: i32,
    pub pop: u32,
    pub jobs: u32,
    pub pol: i32,
    pub happy: i32,
    pub edu: i32,
    pub health: i32,
}

impl TileData {
    const fn base(tile: TileType, category: TileCategory, cost: i64, unlock_level: u32) -> Self {
        Self {
            tile,
            category,
            cost,
            unlock_level,
            power: 0,
            water: 0,
            income: 0,
            pop: 0,
            jobs: 0,
            pol: 0,
            happy: 0,
            edu: 0,
            health: 0,
        }
    }

    const fn utilities(mut self, power: i32, water: i32, income: i32) -> Self {
        self.power = power;
        self.water = water;
        self.income = income;
        self
    }

    const fn people(mut self, pop: u32, jobs: u32) -> Self {
        self.pop = pop;
        self.jobs = jobs;
        self
    }

    const fn pollution(mut self, pol: i32) -> Self {
        self.pol = pol;
        self
    }

    const fn bonuses(mut self, happy: i32, edu: i32, health: i32) -> Self {
        self.happy = happy;
        self.edu = edu;
        self.health = health;
        self
    }

    pub fn is_road_sensitive(&self) -> bool {
        self.category.is_road_sensitive()
    }

    pub fn is_power_producer(&self) -> bool {
        self.category.is_power_producer()
    }
}

/// Coefficient table. Row order matches [`TileType::ALL`].
fn tile_data(tile: TileType) -> TileData {
    use TileType::*;
    let d = |cost, unlock| TileData::base(tile, tile.category(), cost, unlock);
    match tile {
        Empty => d(0, 1),
        Road => d(20, 1).utilities(0, 0, -2),

        ResidentialTiny => d(40, 1).utilities(1, 1, 4).people(4, 0),
        Residential => d(100, 1).utilities(2, 1, 10).people(10, 0),
        ResidentialSuburb => d(240, 1).utilities(4, 2, 24).people(25, 0),
        ResidentialApartments => d(600, 1).utilities(8, 4, 70).people(80, 0),
        ResidentialHigh => d(1_600, 1).utilities(20, 10, 200).people(250, 0),
        ResidentialLuxury => d(6_000, 2).utilities(50, 25, 1_000).people(600, 0),
        ResidentialArcology => d(100_000, 3)
            .utilities(200, 100, 10_000)
            .people(5_000, 0)
            .pollution(-20),

        CommercialStall => d(80, 1).utilities(1, 1, 20).people(0, 2).pollution(1),
        Commercial => d(200, 1).utilities(5, 2, 50).people(0, 8).pollution(1),
        CommercialMall => d(3_000, 1).utilities(40, 20, 900).people(0, 100).pollution(5),
        CommercialHigh => d(10_000, 1)
            .utilities(100, 50, 3_600)
            .people(0, 400)
            .pollution(10),
        OfficeTower => d(6_000, 1).utilities(100, 40, 3_000).people(0, 250),
        TechCampus => d(24_000, 2).utilities(300, 100, 12_000).people(0, 800),
        MegaCasino => d(50_000, 3)
            .utilities(500, 200, 30_000)
            .people(0, 1_200)
            .pollution(20)
            .bonuses(20, 0, 0),

        Farm => d(240, 4).utilities(1, 15, 30).people(2, 5).pollution(-2),
        IndustrialWorkshop => d(160, 5).utilities(5, 2, 60).people(0, 6).pollution(3),
        Industrial => d(300, 6).utilities(15, 8, 120).people(0, 20).pollution(10),
        IndustrialHigh => d(5_000, 7)
            .utilities(100, 80, 1_600)
            .people(0, 150)
            .pollution(50),
        BioTechLab => d(16_000, 8)
            .utilities(200, 100, 7_000)
            .people(0, 300)
            .pollution(5),
        AutomatedFactory => d(30_000, 9)
            .utilities(500, 50, 24_000)
            .people(0, 100)
            .pollution(2),
        AerospaceHangar => d(70_000, 10)
            .utilities(1_000, 400, 50_000)
            .people(0, 2_000)
            .pollution(15),

        PowerWind => d(1_000, 1).utilities(-40, 0, -20),
        PowerCoal => d(2_000, 1).utilities(-250, 20, -200).pollution(50),
        PowerSolar => d(6_000, 1).utilities(-300, 5, -120).pollution(-10),
        PowerBiomass => d(4_000, 2).utilities(-400, 30, -300).pollution(20),
        PowerGeothermal => d(12_000, 3).utilities(-1_200, 60, -800).pollution(5),
        PowerNuclear => d(30_000, 1).utilities(-3_000, 500, -3_000).pollution(10),
        PowerFusion => d(240_000, 1).utilities(-25_000, 1_000, -10_000),

        WaterTower => d(800, 1).utilities(5, -100, -60),
        WaterTreatment => d(3_000, 2).utilities(50, -500, -300).pollution(-10),
        Desalination => d(24_000, 3).utilities(400, -3_000, -1_600).pollution(5),

        Police => d(2_400, 4).utilities(20, 10, -400),
        PoliceHq => d(16_000, 5).utilities(100, 50, -2_400),
        FireStation => d(2_000, 6).utilities(20, 40, -360),
        FireHq => d(12_000, 7).utilities(80, 150, -1_800),
        Clinic => d(3_000, 8).utilities(30, 30, -600).bonuses(0, 0, 15),
        Hospital => d(8_000, 9).utilities(100, 100, -1_200).bonuses(0, 0, 40),
        MedicalCenter => d(40_000, 10).utilities(400, 400, -6_000).bonuses(0, 0, 90),
        School => d(1_600, 11).utilities(25, 15, -500).bonuses(0, 20, 0),
        Library => d(2_400, 12).utilities(10, 10, -200).bonuses(5, 10, 0),
        HighSchool => d(7_000, 13).utilities(60, 40, -1_600).bonuses(0, 40, 0),
        University => d(20_000, 14).utilities(200, 150, -5_000).bonuses(0, 80, 0),
        ResearchLab => d(80_000, 15).utilities(1_000, 200, -10_000).bonuses(0, 150, 0),

        ParkSmall => d(600, 1).utilities(2, 5, -30).bonuses(5, 0, 0),
        DogPark => d(1_200, 1).utilities(5, 15, -50).bonuses(8, 0, 0),
        ParkLarge => d(4_000, 1).utilities(10, 30, -160).bonuses(12, 0, 0),
        Museum => d(10_000, 1).utilities(80, 40, -800).bonuses(15, 10, 0),
        ArtGallery => d(14_000, 1).utilities(60, 30, -600).bonuses(20, 5, 0),
        Stadium => d(30_000, 2).utilities(500, 300, 3_000).bonuses(45, 0, 0),
        ThemePark => d(90_000, 3).utilities(1_200, 600, 16_000).bonuses(80, 0, 0),
        VrPlaza => d(160_000, 4).utilities(2_500, 100, -4_000).bonuses(120, 0, 0),

        Subway => d(5_000, 1).utilities(50, 10, -1_000).bonuses(15, 0, 0),
        Airport => d(70_000, 2)
            .utilities(1_500, 800, 20_000)
            .people(0, 1_500)
            .pollution(150),
        Recycling => d(5_000, 1).utilities(100, 50, -400).pollution(-50),
        MaglevStation => d(130_000, 3)
            .utilities(2_000, 200, 10_000)
            .bonuses(40, 0, 0),
        SpacePort => d(500_000, 5)
            .utilities(10_000, 5_000, 200_000)
            .people(0, 5_000)
            .pollution(300),
    }
}

/// Process-wide tile coefficient table, indexed by wire code.
#[derive(Resource, Debug, Clone)]
pub struct TileCatalog {
    entries: Vec<TileData>,
}

impl Default for TileCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TileCatalog {
    /// Build the standard catalog. Total over [`TileType::ALL`].
    pub fn standard() -> Self {
        Self {
            entries: TileType::ALL.iter().map(|&t| tile_data(t)).collect(),
        }
    }

    #[inline]
    pub fn get(&self, tile: TileType) -> &TileData {
        &self.entries[tile as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileData> {
        self.entries.iter()
    }

    /// Build-menu listing for one category, in catalog order.
    pub fn tools_in(&self, category: TileCategory) -> Vec<TileType> {
        self.entries
            .iter()
            .filter(|d| d.category == category)
            .map(|d| d.tile)
            .collect()
    }

    /// Tiles a city at `level` is allowed to place.
    pub fn unlocked_at(&self, level: u32) -> Vec<TileType> {
        self.entries
            .iter()
            .filter(|d| !d.tile.is_empty() && d.unlock_level <= level)
            .map(|d| d.tile)
            .collect()
    }
}
