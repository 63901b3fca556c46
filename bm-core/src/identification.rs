//! Board identification
//!
//! Maps the free-text vendor and product strings reported by the platform
//! inventory onto closed `Manufacturer` and `Model` enumerations.
//!
//! # Matching
//!
//! Input is trimmed, lowercased and whitespace-collapsed, then tested against an
//! ordered signature table. Each signature is either a prefix or a substring
//! match. The FIRST matching entry wins, so an entry that is more specific than
//! a later one with a different target must be declared before it
//! (`p8z77-v pro` before `p8z77-v`). `tests::test_no_signature_is_shadowed`
//! enforces this for both tables.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Signature tables
// ============================================================================

/// How a signature is compared against normalized input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Input must start with the pattern
    Prefix,
    /// Pattern may appear anywhere in the input
    Contains,
}

/// One row of a lookup table. Patterns are stored lowercase.
#[derive(Debug, Clone, Copy)]
pub struct Signature<T> {
    pub kind: MatchKind,
    pub pattern: &'static str,
    pub target: T,
}

impl<T: Copy> Signature<T> {
    const fn prefix(pattern: &'static str, target: T) -> Self {
        Self { kind: MatchKind::Prefix, pattern, target }
    }

    const fn contains(pattern: &'static str, target: T) -> Self {
        Self { kind: MatchKind::Contains, pattern, target }
    }

    /// Test this signature against already-normalized input
    pub fn matches(&self, normalized: &str) -> bool {
        match self.kind {
            MatchKind::Prefix => normalized.starts_with(self.pattern),
            MatchKind::Contains => normalized.contains(self.pattern),
        }
    }
}

/// Lowercase, trim and collapse internal whitespace
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// First-match lookup shared by both resolvers
fn first_match<T: Copy>(table: &[Signature<T>], raw: Option<&str>) -> Option<T> {
    let normalized = normalize(raw?);
    if normalized.is_empty() {
        return None;
    }
    table
        .iter()
        .find(|sig| sig.matches(&normalized))
        .map(|sig| sig.target)
}

// ============================================================================
// Manufacturer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Manufacturer {
    Abit,
    Acer,
    Alienware,
    AMD,
    AOpen,
    Apple,
    ASRock,
    ASUS,
    Biostar,
    Clevo,
    Dell,
    DFI,
    ECS,
    EPoX,
    EVGA,
    FIC,
    Foxconn,
    Fujitsu,
    Gateway,
    Gigabyte,
    HP,
    IBM,
    Intel,
    Jetway,
    LattePanda,
    Lenovo,
    Medion,
    Microsoft,
    MSI,
    NEC,
    Pegatron,
    Samsung,
    Sapphire,
    Shuttle,
    Sony,
    Supermicro,
    Toshiba,
    XFX,
    Zotac,
    Unknown,
}

impl Manufacturer {
    /// Canonical short vendor name used in display names
    pub fn name(&self) -> &'static str {
        match self {
            Self::Abit => "Abit",
            Self::Acer => "Acer",
            Self::Alienware => "Alienware",
            Self::AMD => "AMD",
            Self::AOpen => "AOpen",
            Self::Apple => "Apple",
            Self::ASRock => "ASRock",
            Self::ASUS => "ASUS",
            Self::Biostar => "Biostar",
            Self::Clevo => "Clevo",
            Self::Dell => "Dell",
            Self::DFI => "DFI",
            Self::ECS => "ECS",
            Self::EPoX => "EPoX",
            Self::EVGA => "EVGA",
            Self::FIC => "FIC",
            Self::Foxconn => "Foxconn",
            Self::Fujitsu => "Fujitsu",
            Self::Gateway => "Gateway",
            Self::Gigabyte => "Gigabyte",
            Self::HP => "HP",
            Self::IBM => "IBM",
            Self::Intel => "Intel",
            Self::Jetway => "Jetway",
            Self::LattePanda => "LattePanda",
            Self::Lenovo => "Lenovo",
            Self::Medion => "Medion",
            Self::Microsoft => "Microsoft",
            Self::MSI => "MSI",
            Self::NEC => "NEC",
            Self::Pegatron => "Pegatron",
            Self::Samsung => "Samsung",
            Self::Sapphire => "Sapphire",
            Self::Shuttle => "Shuttle",
            Self::Sony => "Sony",
            Self::Supermicro => "Supermicro",
            Self::Toshiba => "Toshiba",
            Self::XFX => "XFX",
            Self::Zotac => "Zotac",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vendor signatures in priority order.
///
/// Brands whose board strings embed another vendor's name come first
/// (Alienware boards report "Dell Inc. Alienware" on some firmware), and the
/// long legal names precede the short prefixes of the same vendor.
pub const MANUFACTURER_SIGNATURES: &[Signature<Manufacturer>] = &[
    Signature::contains("alienware", Manufacturer::Alienware),
    Signature::contains("asrock", Manufacturer::ASRock),
    Signature::contains("asustek", Manufacturer::ASUS),
    Signature::prefix("asus", Manufacturer::ASUS),
    Signature::prefix("abit", Manufacturer::Abit),
    Signature::prefix("acer", Manufacturer::Acer),
    Signature::prefix("advanced micro devices", Manufacturer::AMD),
    Signature::prefix("amd", Manufacturer::AMD),
    Signature::prefix("aopen", Manufacturer::AOpen),
    Signature::prefix("apple", Manufacturer::Apple),
    Signature::contains("biostar", Manufacturer::Biostar),
    Signature::prefix("clevo", Manufacturer::Clevo),
    Signature::prefix("dell", Manufacturer::Dell),
    Signature::prefix("dfi", Manufacturer::DFI),
    Signature::prefix("elitegroup", Manufacturer::ECS),
    Signature::prefix("ecs", Manufacturer::ECS),
    Signature::prefix("epox", Manufacturer::EPoX),
    Signature::prefix("evga", Manufacturer::EVGA),
    Signature::prefix("first international computer", Manufacturer::FIC),
    Signature::prefix("fic", Manufacturer::FIC),
    Signature::prefix("foxconn", Manufacturer::Foxconn),
    Signature::prefix("fujitsu", Manufacturer::Fujitsu),
    Signature::prefix("gateway", Manufacturer::Gateway),
    Signature::contains("gigabyte", Manufacturer::Gigabyte),
    Signature::prefix("hewlett-packard", Manufacturer::HP),
    Signature::prefix("hp", Manufacturer::HP),
    Signature::prefix("ibm", Manufacturer::IBM),
    Signature::prefix("intel", Manufacturer::Intel),
    Signature::prefix("jetway", Manufacturer::Jetway),
    Signature::prefix("lattepanda", Manufacturer::LattePanda),
    Signature::prefix("lenovo", Manufacturer::Lenovo),
    Signature::prefix("medion", Manufacturer::Medion),
    Signature::prefix("microsoft", Manufacturer::Microsoft),
    Signature::prefix("micro-star", Manufacturer::MSI),
    Signature::prefix("msi", Manufacturer::MSI),
    Signature::prefix("nec", Manufacturer::NEC),
    Signature::prefix("pegatron", Manufacturer::Pegatron),
    Signature::prefix("samsung", Manufacturer::Samsung),
    Signature::prefix("sapphire", Manufacturer::Sapphire),
    Signature::prefix("shuttle", Manufacturer::Shuttle),
    Signature::prefix("sony", Manufacturer::Sony),
    Signature::prefix("supermicro", Manufacturer::Supermicro),
    Signature::prefix("super micro", Manufacturer::Supermicro),
    Signature::prefix("toshiba", Manufacturer::Toshiba),
    Signature::prefix("xfx", Manufacturer::XFX),
    Signature::prefix("zotac", Manufacturer::Zotac),
];

/// Classify a raw board vendor string. Absent or blank input is `Unknown`.
pub fn resolve_manufacturer(raw: Option<&str>) -> Manufacturer {
    first_match(MANUFACTURER_SIGNATURES, raw).unwrap_or(Manufacturer::Unknown)
}

// ============================================================================
// Model
// ============================================================================

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    // ASRock
    AB350_Pro4,
    B450_Steel_Legend,
    X570_Taichi,
    Z77_Pro4_M,

    // ASUS
    CROSSHAIR_III_FORMULA,
    ROG_CROSSHAIR_VIII_HERO,
    M2N_SLI_Deluxe,
    P5W_DH_Deluxe,
    P6X58D_E,
    P8P67,
    P8P67_EVO,
    P8P67_PRO,
    P8P67_M_PRO,
    P8Z77_V,
    P8Z77_V_LX,
    P8Z77_V_PRO,
    P9X79,
    PRIME_X370_PRO,
    PRIME_X470_PRO,
    PRIME_X570_PRO,
    ROG_STRIX_Z390_E_GAMING,

    // DFI
    LP_BI_P45_T2RS_Elite,
    LP_DK_P55_T3eH9,

    // ECS
    A890GXM_A,

    // EVGA
    X58_SLI_Classified,

    // Gigabyte
    AX370_Gaming_K7,
    B560M_AORUS_ELITE,
    EP45_DS3R,
    EP45_UD3R,
    G41MT_S2,
    G41MT_S2P,
    MA770T_UD3,
    MA770T_UD3P,
    P35_DS3,
    P35_DS3L,
    P55_UD4,
    X470_AORUS_GAMING_7_WIFI,
    X570_AORUS_MASTER,
    Z390_AORUS_PRO,
    Z390_AORUS_PRO_WIFI,
    Z390_M_GAMING,
    Z68X_UD3H_B3,
    Z68XP_UD3R,

    // MSI
    B450A_PRO,
    X570_Gaming_Plus,
    Z270_PC_MATE,

    // Shuttle
    FH67,

    Unknown,
}

impl Model {
    /// Canonical product name
    pub fn name(&self) -> &'static str {
        match self {
            Self::AB350_Pro4 => "AB350 Pro4",
            Self::B450_Steel_Legend => "B450 Steel Legend",
            Self::X570_Taichi => "X570 Taichi",
            Self::Z77_Pro4_M => "Z77 Pro4-M",
            Self::CROSSHAIR_III_FORMULA => "Crosshair III Formula",
            Self::ROG_CROSSHAIR_VIII_HERO => "ROG CROSSHAIR VIII HERO",
            Self::M2N_SLI_Deluxe => "M2N-SLI DELUXE",
            Self::P5W_DH_Deluxe => "P5W DH Deluxe",
            Self::P6X58D_E => "P6X58D-E",
            Self::P8P67 => "P8P67",
            Self::P8P67_EVO => "P8P67 EVO",
            Self::P8P67_PRO => "P8P67 PRO",
            Self::P8P67_M_PRO => "P8P67-M PRO",
            Self::P8Z77_V => "P8Z77-V",
            Self::P8Z77_V_LX => "P8Z77-V LX",
            Self::P8Z77_V_PRO => "P8Z77-V PRO",
            Self::P9X79 => "P9X79",
            Self::PRIME_X370_PRO => "PRIME X370-PRO",
            Self::PRIME_X470_PRO => "PRIME X470-PRO",
            Self::PRIME_X570_PRO => "PRIME X570-PRO",
            Self::ROG_STRIX_Z390_E_GAMING => "ROG STRIX Z390-E GAMING",
            Self::LP_BI_P45_T2RS_Elite => "LP BI P45-T2RS Elite",
            Self::LP_DK_P55_T3eH9 => "LP DK P55-T3eH9",
            Self::A890GXM_A => "A890GXM-A",
            Self::X58_SLI_Classified => "X58 SLI Classified",
            Self::AX370_Gaming_K7 => "AX370-Gaming K7",
            Self::B560M_AORUS_ELITE => "B560M AORUS ELITE",
            Self::EP45_DS3R => "EP45-DS3R",
            Self::EP45_UD3R => "EP45-UD3R",
            Self::G41MT_S2 => "G41MT-S2",
            Self::G41MT_S2P => "G41MT-S2P",
            Self::MA770T_UD3 => "MA770T-UD3",
            Self::MA770T_UD3P => "MA770T-UD3P",
            Self::P35_DS3 => "P35-DS3",
            Self::P35_DS3L => "P35-DS3L",
            Self::P55_UD4 => "P55-UD4",
            Self::X470_AORUS_GAMING_7_WIFI => "X470 AORUS GAMING 7 WIFI",
            Self::X570_AORUS_MASTER => "X570 AORUS MASTER",
            Self::Z390_AORUS_PRO => "Z390 AORUS PRO",
            Self::Z390_AORUS_PRO_WIFI => "Z390 AORUS PRO WIFI",
            Self::Z390_M_GAMING => "Z390 M GAMING",
            Self::Z68X_UD3H_B3 => "Z68X-UD3H-B3",
            Self::Z68XP_UD3R => "Z68XP-UD3R",
            Self::B450A_PRO => "B450A-PRO",
            Self::X570_Gaming_Plus => "X570-A PRO GAMING PLUS",
            Self::Z270_PC_MATE => "Z270 PC MATE",
            Self::FH67 => "FH67",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Product signatures in priority order.
///
/// Board families share a stem (`p8p67`, `z390 aorus pro`); every suffixed
/// variant is listed before its stem.
pub const MODEL_SIGNATURES: &[Signature<Model>] = &[
    // ASRock
    Signature::prefix("ab350 pro4", Model::AB350_Pro4),
    Signature::prefix("b450 steel legend", Model::B450_Steel_Legend),
    Signature::prefix("x570 taichi", Model::X570_Taichi),
    Signature::prefix("z77 pro4-m", Model::Z77_Pro4_M),
    // ASUS
    Signature::prefix("crosshair iii formula", Model::CROSSHAIR_III_FORMULA),
    Signature::prefix("rog crosshair viii hero", Model::ROG_CROSSHAIR_VIII_HERO),
    Signature::prefix("m2n-sli deluxe", Model::M2N_SLI_Deluxe),
    Signature::prefix("p5w dh deluxe", Model::P5W_DH_Deluxe),
    Signature::prefix("p6x58d-e", Model::P6X58D_E),
    Signature::prefix("p8p67-m pro", Model::P8P67_M_PRO),
    Signature::prefix("p8p67 evo", Model::P8P67_EVO),
    Signature::prefix("p8p67 pro", Model::P8P67_PRO),
    Signature::prefix("p8p67", Model::P8P67),
    Signature::prefix("p8z77-v lx", Model::P8Z77_V_LX),
    Signature::prefix("p8z77-v pro", Model::P8Z77_V_PRO),
    Signature::prefix("p8z77-v", Model::P8Z77_V),
    Signature::prefix("p9x79", Model::P9X79),
    Signature::prefix("prime x370-pro", Model::PRIME_X370_PRO),
    Signature::prefix("prime x470-pro", Model::PRIME_X470_PRO),
    Signature::prefix("prime x570-pro", Model::PRIME_X570_PRO),
    Signature::prefix("rog strix z390-e gaming", Model::ROG_STRIX_Z390_E_GAMING),
    // DFI
    Signature::prefix("lp bi p45-t2rs elite", Model::LP_BI_P45_T2RS_Elite),
    Signature::prefix("lp dk p55-t3eh9", Model::LP_DK_P55_T3eH9),
    // ECS
    Signature::prefix("a890gxm-a", Model::A890GXM_A),
    // EVGA
    Signature::prefix("x58 sli classified", Model::X58_SLI_Classified),
    // Gigabyte
    Signature::prefix("ax370-gaming k7", Model::AX370_Gaming_K7),
    Signature::prefix("b560m aorus elite", Model::B560M_AORUS_ELITE),
    Signature::prefix("ep45-ds3r", Model::EP45_DS3R),
    Signature::prefix("ep45-ud3r", Model::EP45_UD3R),
    Signature::prefix("g41mt-s2p", Model::G41MT_S2P),
    Signature::prefix("g41mt-s2", Model::G41MT_S2),
    Signature::prefix("ma770t-ud3p", Model::MA770T_UD3P),
    Signature::prefix("ma770t-ud3", Model::MA770T_UD3),
    Signature::prefix("p35-ds3l", Model::P35_DS3L),
    Signature::prefix("p35-ds3", Model::P35_DS3),
    Signature::prefix("p55-ud4", Model::P55_UD4),
    Signature::prefix("x470 aorus gaming 7 wifi", Model::X470_AORUS_GAMING_7_WIFI),
    Signature::prefix("x570 aorus master", Model::X570_AORUS_MASTER),
    Signature::prefix("z390 aorus pro wifi", Model::Z390_AORUS_PRO_WIFI),
    Signature::prefix("z390 aorus pro", Model::Z390_AORUS_PRO),
    Signature::prefix("z390 m gaming", Model::Z390_M_GAMING),
    Signature::prefix("z68x-ud3h-b3", Model::Z68X_UD3H_B3),
    Signature::prefix("z68xp-ud3r", Model::Z68XP_UD3R),
    // MSI, whose DMI product strings carry the MS-xxxx board id in parentheses
    Signature::contains("b450a-pro", Model::B450A_PRO),
    Signature::contains("x570-a pro", Model::X570_Gaming_Plus),
    Signature::contains("x570 gaming plus", Model::X570_Gaming_Plus),
    Signature::contains("z270 pc mate", Model::Z270_PC_MATE),
    // Shuttle
    Signature::prefix("fh67", Model::FH67),
];

/// Classify a raw board product string. Absent or blank input is `Unknown`.
pub fn resolve_model(raw: Option<&str>) -> Model {
    first_match(MODEL_SIGNATURES, raw).unwrap_or(Model::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An entry is unreachable when an earlier entry with a different target
    /// already matches its own pattern text.
    fn shadowed<T: Copy + PartialEq + fmt::Debug>(table: &[Signature<T>]) -> Vec<String> {
        let mut problems = Vec::new();
        for (j, later) in table.iter().enumerate() {
            for earlier in &table[..j] {
                if earlier.target != later.target && earlier.matches(later.pattern) {
                    problems.push(format!(
                        "{:?} ({:?}) shadows {:?} ({:?})",
                        earlier.pattern, earlier.target, later.pattern, later.target
                    ));
                }
            }
        }
        problems
    }

    #[test]
    fn test_no_signature_is_shadowed() {
        assert_eq!(shadowed(MANUFACTURER_SIGNATURES), Vec::<String>::new());
        assert_eq!(shadowed(MODEL_SIGNATURES), Vec::<String>::new());
    }

    #[test]
    fn test_patterns_are_normalized() {
        for sig in MANUFACTURER_SIGNATURES {
            assert_eq!(normalize(sig.pattern), sig.pattern);
        }
        for sig in MODEL_SIGNATURES {
            assert_eq!(normalize(sig.pattern), sig.pattern);
        }
    }

    #[test]
    fn test_resolve_manufacturer_known_vendors() {
        assert_eq!(resolve_manufacturer(Some("ASUSTeK COMPUTER INC.")), Manufacturer::ASUS);
        assert_eq!(resolve_manufacturer(Some("ASRock")), Manufacturer::ASRock);
        assert_eq!(
            resolve_manufacturer(Some("Gigabyte Technology Co., Ltd.")),
            Manufacturer::Gigabyte
        );
        assert_eq!(
            resolve_manufacturer(Some("Micro-Star International Co., Ltd.")),
            Manufacturer::MSI
        );
        assert_eq!(resolve_manufacturer(Some("Dell Inc.")), Manufacturer::Dell);
        assert_eq!(resolve_manufacturer(Some("Hewlett-Packard")), Manufacturer::HP);
        assert_eq!(resolve_manufacturer(Some("  intel corporation ")), Manufacturer::Intel);
    }

    #[test]
    fn test_resolve_manufacturer_declaration_order_breaks_ties() {
        // Both "alienware" and "dell" match; alienware is declared first
        assert_eq!(
            resolve_manufacturer(Some("Dell Inc. Alienware")),
            Manufacturer::Alienware
        );
    }

    #[test]
    fn test_resolve_manufacturer_unknown_and_absent() {
        assert_eq!(resolve_manufacturer(None), Manufacturer::Unknown);
        assert_eq!(resolve_manufacturer(Some("")), Manufacturer::Unknown);
        assert_eq!(resolve_manufacturer(Some("   ")), Manufacturer::Unknown);
        assert_eq!(resolve_manufacturer(Some("To Be Filled By O.E.M.")), Manufacturer::Unknown);
        assert_eq!(resolve_manufacturer(Some("Placer Devices")), Manufacturer::Unknown);
    }

    #[test]
    fn test_resolve_model_prefers_specific_variant() {
        assert_eq!(resolve_model(Some("P8P67 PRO")), Model::P8P67_PRO);
        assert_eq!(resolve_model(Some("P8P67")), Model::P8P67);
        assert_eq!(resolve_model(Some("P8P67 REV 3.1")), Model::P8P67);
        assert_eq!(resolve_model(Some("P8Z77-V LX")), Model::P8Z77_V_LX);
        assert_eq!(resolve_model(Some("Z390 AORUS PRO WIFI-CF")), Model::Z390_AORUS_PRO_WIFI);
        assert_eq!(resolve_model(Some("Z390 AORUS PRO-CF")), Model::Z390_AORUS_PRO);
        assert_eq!(resolve_model(Some("G41MT-S2P")), Model::G41MT_S2P);
    }

    #[test]
    fn test_resolve_model_substring_for_msi() {
        assert_eq!(resolve_model(Some("MS-7B86 (B450A-PRO)")), Model::B450A_PRO);
    }

    #[test]
    fn test_resolve_model_unknown() {
        assert_eq!(resolve_model(None), Model::Unknown);
        assert_eq!(resolve_model(Some("")), Model::Unknown);
        assert_eq!(resolve_model(Some("Default string")), Model::Unknown);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Manufacturer::Gigabyte.to_string(), "Gigabyte");
        assert_eq!(Manufacturer::Unknown.to_string(), "Unknown");
        assert_eq!(Model::P8Z77_V_PRO.to_string(), "P8Z77-V PRO");
    }
}
