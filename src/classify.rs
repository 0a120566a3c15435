//! Maps free-text plan SKU descriptions to canonical product-category
//! keywords.
//!
//! The mapping is an ordered list, not a hash map: several keys can be
//! substrings of the same SKU description, and the first entry in list order
//! wins. That iteration order is part of the contract.

/// One mapping entry: a literal SKU fragment and the product categories a
/// plan carrying that fragment can apply to.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub sku_key: &'static str,
    pub keywords: &'static [&'static str],
}

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        sku_key: "Warranty : Water Cooler/Dispencer/Geyser/RoomCooler/Heater",
        keywords: &[
            "COOLER",
            "DISPENCER",
            "GEYSER",
            "ROOM COOLER",
            "HEATER",
            "WATER HEATER",
            "WATER DISPENSER",
        ],
    },
    CategoryRule {
        sku_key: "Warranty : Fan/Mixr/IrnBox/Kettle/OTG/Grmr/Geysr/Steamr/Inductn",
        keywords: &[
            "FAN",
            "MIXER",
            "IRON BOX",
            "KETTLE",
            "OTG",
            "GROOMING KIT",
            "GEYSER",
            "STEAMER",
            "INDUCTION",
            "CEILING FAN",
            "TOWER FAN",
            "PEDESTAL FAN",
            "INDUCTION COOKER",
            "ELECTRIC KETTLE",
            "WALL FAN",
            "MIXER GRINDER",
            "CELLING FAN",
        ],
    },
    CategoryRule {
        sku_key: "AC : EWP : Warranty : AC",
        keywords: &["AC", "AIR CONDITIONER", "AC INDOOR"],
    },
    CategoryRule {
        sku_key: "HAEW : Warranty : Air Purifier/WaterPurifier",
        keywords: &["AIR PURIFIER", "WATER PURIFIER"],
    },
    CategoryRule {
        sku_key: "HAEW : Warranty : Dryer/MW/DishW",
        keywords: &[
            "DRYER",
            "MICROWAVE OVEN",
            "DISH WASHER",
            "MICROWAVE OVEN-CONV",
        ],
    },
    CategoryRule {
        sku_key: "HAEW : Warranty : Ref/WM",
        keywords: &[
            "REFRIGERATOR",
            "WASHING MACHINE",
            "WASHING MACHINE-TL",
            "REFRIGERATOR-DC",
            "WASHING MACHINE-FL",
            "WASHING MACHINE-SA",
            "REF",
            "REFRIGERATOR-CBU",
            "REFRIGERATOR-FF",
            "WM",
        ],
    },
    CategoryRule {
        sku_key: "HAEW : Warranty : TV",
        keywords: &["TV", "TV 28 %", "TV 18 %"],
    },
    CategoryRule {
        sku_key: "TV : TTC : Warranty and Protection : TV",
        keywords: &["TV", "TV 28 %", "TV 18 %"],
    },
    CategoryRule {
        sku_key: "TV : Spill and Drop Protection",
        keywords: &["TV", "TV 28 %", "TV 18 %"],
    },
    CategoryRule {
        sku_key: "HAEW : Warranty :Chop/Blend/Toast/Air Fryer/Food Processr/JMG/Induction",
        keywords: &[
            "CHOPPER",
            "BLENDER",
            "TOASTER",
            "AIR FRYER",
            "FOOD PROCESSOR",
            "JUICER",
            "INDUCTION COOKER",
        ],
    },
    CategoryRule {
        sku_key: "HAEW : Warranty : HOB and Chimney",
        keywords: &["HOB", "CHIMNEY"],
    },
    CategoryRule {
        sku_key: "HAEW : Warranty : HT/SoundBar/AudioSystems/PortableSpkr",
        keywords: &[
            "HOME THEATRE",
            "AUDIO SYSTEM",
            "SPEAKER",
            "SOUND BAR",
            "PARTY SPEAKER",
        ],
    },
    CategoryRule {
        sku_key: "HAEW : Warranty : Vacuum Cleaner/Fans/Groom&HairCare/Massager/Iron",
        keywords: &[
            "VACUUM CLEANER",
            "FAN",
            "MASSAGER",
            "IRON BOX",
            "CEILING FAN",
            "TOWER FAN",
            "PEDESTAL FAN",
            "WALL FAN",
            "ROBO VACCUM CLEANER",
        ],
    },
    CategoryRule {
        sku_key: "AC AMC",
        keywords: &["AC", "AC INDOOR"],
    },
];

/// Returns the lower-cased keyword set of the first rule whose key is a
/// literal substring of the SKU description, or an empty vec when no rule
/// matches. Key matching is unanchored and case-sensitive.
pub fn classify_sku(description: &str) -> Vec<String> {
    for rule in CATEGORY_RULES {
        if description.contains(rule.sku_key) {
            return rule
                .keywords
                .iter()
                .map(|kw| kw.to_lowercase())
                .collect();
        }
    }
    Vec::new()
}
