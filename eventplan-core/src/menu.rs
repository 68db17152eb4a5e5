//! Menu catalog: categories, items, dietary tags and occasion templates.
//!
//! The built-in catalog is static. Item ids are slugs of the item names
//! ("Paneer Tikka" → "paneer-tikka"). [`Menu`] layers user-added items, kept
//! in storage under [`CUSTOM_MENU_ITEMS_KEY`], on top of it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use slug::slugify;
use tracing::{info, warn};

use crate::constants::CUSTOM_MENU_ITEMS_KEY;
use crate::error::{PlanError, PlanResult};
use crate::storage::KeyValueStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dietary {
    Vegetarian,
    Vegan,
    NonVegetarian,
    ContainsDairy,
    ContainsNuts,
    GlutenFree,
    Spicy,
}

impl Dietary {
    pub const ALL: [Dietary; 7] = [
        Dietary::Vegetarian,
        Dietary::Vegan,
        Dietary::NonVegetarian,
        Dietary::ContainsDairy,
        Dietary::ContainsNuts,
        Dietary::GlutenFree,
        Dietary::Spicy,
    ];

    pub fn icon(self) -> &'static str {
        match self {
            Dietary::Vegetarian => "🌱",
            Dietary::Vegan => "🌿",
            Dietary::NonVegetarian => "🍖",
            Dietary::ContainsDairy => "🥛",
            Dietary::ContainsNuts => "🥜",
            Dietary::GlutenFree => "🌾",
            Dietary::Spicy => "🌶️",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dietary::Vegetarian => "vegetarian",
            Dietary::Vegan => "vegan",
            Dietary::NonVegetarian => "non-vegetarian",
            Dietary::ContainsDairy => "contains-dairy",
            Dietary::ContainsNuts => "contains-nuts",
            Dietary::GlutenFree => "gluten-free",
            Dietary::Spicy => "spicy",
        }
    }
}

impl fmt::Display for Dietary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.label())
    }
}

impl FromStr for Dietary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Dietary::ALL
            .into_iter()
            .find(|d| d.label() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Dietary::ALL.iter().map(|d| d.label()).collect();
                format!("unknown dietary tag '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

#[derive(Debug)]
pub struct MenuCategory {
    pub id: &'static str,
    pub icon: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    item_names: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: &'static str,
    pub dietary: Vec<Dietary>,
    pub description: Option<String>,
    pub custom: bool,
}

impl MenuItem {
    /// Case-insensitive substring match on name or description, and every
    /// filter tag present.
    pub fn matches(&self, query: &str, filters: &[Dietary]) -> bool {
        let query = query.trim().to_lowercase();
        let text_match = query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query));
        text_match && filters.iter().all(|f| self.dietary.contains(f))
    }
}

impl MenuCategory {
    /// The built-in items of this category.
    pub fn items(&self) -> Vec<MenuItem> {
        self.item_names
            .iter()
            .map(|&name| MenuItem {
                id: slugify(name),
                name: name.to_string(),
                category: self.id,
                dietary: dietary_for(self.id, name),
                description: (self.id == "liveCounters").then(|| {
                    format!("Interactive {} with fresh preparation", name.to_lowercase())
                }),
                custom: false,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.item_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_names.is_empty()
    }
}

fn dietary_for(category: &str, name: &str) -> Vec<Dietary> {
    match category {
        "nonveg" => vec![Dietary::NonVegetarian],
        "rice" if ["Chicken", "Mutton", "Egg"].iter().any(|m| name.contains(m)) => {
            vec![Dietary::NonVegetarian]
        }
        "desserts" => vec![Dietary::Vegetarian, Dietary::ContainsDairy],
        _ => vec![Dietary::Vegetarian],
    }
}

/// A user-added item as stored under `customMenuItems`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tag labels; unknown labels are ignored when read
    #[serde(default)]
    pub dietary: Vec<String>,
}

/// User-added items grouped by category id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomItems(BTreeMap<String, Vec<CustomItem>>);

impl CustomItems {
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn in_category(&self, category: &str) -> &[CustomItem] {
        self.0.get(category).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// The built-in catalog plus any custom items.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    custom: CustomItems,
}

impl Menu {
    /// Only the static catalog.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Read custom items from `storage`. A value that cannot be read or
    /// parsed is logged and ignored; the built-in catalog is always there.
    pub fn load<S: KeyValueStorage + ?Sized>(storage: &S) -> Self {
        let raw = match storage.get(CUSTOM_MENU_ITEMS_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "could not read custom menu items");
                None
            }
        };
        let custom = match raw.as_deref().map(serde_json::from_str::<CustomItems>) {
            None => CustomItems::default(),
            Some(Ok(custom)) => custom,
            Some(Err(e)) => {
                warn!(error = %e, "ignoring unreadable custom menu items");
                CustomItems::default()
            }
        };
        Menu { custom }
    }

    pub fn custom(&self) -> &CustomItems {
        &self.custom
    }

    /// Built-in items of `category` followed by its custom items.
    pub fn items(&self, category: &'static MenuCategory) -> Vec<MenuItem> {
        let mut items = category.items();
        items.extend(self.custom.in_category(category.id).iter().map(|c| MenuItem {
            id: c.id.clone(),
            name: c.name.clone(),
            category: category.id,
            dietary: c.dietary.iter().filter_map(|d| d.parse().ok()).collect(),
            description: c.description.clone().filter(|d| !d.is_empty()),
            custom: true,
        }));
        items
    }

    pub fn all_items(&self) -> impl Iterator<Item = MenuItem> + '_ {
        CATEGORIES.iter().flat_map(|c| self.items(c))
    }

    pub fn find_item(&self, id: &str) -> Option<MenuItem> {
        self.all_items().find(|item| item.id == id)
    }

    /// Display name for a menu id; unknown ids are shown as-is.
    pub fn item_name(&self, id: &str) -> String {
        self.find_item(id)
            .map(|item| item.name)
            .unwrap_or_else(|| id.to_string())
    }

    /// Items matching `query` and carrying every tag in `filters`, grouped by
    /// category. Categories with no match are left out.
    pub fn search(
        &self,
        query: &str,
        filters: &[Dietary],
    ) -> Vec<(&'static MenuCategory, Vec<MenuItem>)> {
        CATEGORIES
            .iter()
            .filter_map(|category| {
                let items: Vec<_> = self
                    .items(category)
                    .into_iter()
                    .filter(|item| item.matches(query, filters))
                    .collect();
                (!items.is_empty()).then_some((category, items))
            })
            .collect()
    }

    /// Add a custom item to `category` and save the whole custom set.
    ///
    /// The id is `custom-<millis>-<slug>`. Nothing changes in memory when the
    /// write fails.
    pub fn add_custom<S: KeyValueStorage + ?Sized>(
        &mut self,
        storage: &mut S,
        category_id: &str,
        name: &str,
        description: Option<&str>,
        dietary: &[Dietary],
        created_at_ms: i64,
    ) -> PlanResult<MenuItem> {
        let Some(category) = category(category_id) else {
            let known: Vec<_> = CATEGORIES.iter().map(|c| c.id).collect();
            return Err(PlanError::InvalidMenuItem(format!(
                "unknown category '{}' (expected one of: {})",
                category_id,
                known.join(", ")
            )));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(PlanError::InvalidMenuItem("a name is required".into()));
        }

        let item = CustomItem {
            id: format!("custom-{}-{}", created_at_ms, slugify(name)),
            name: name.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from),
            dietary: dietary.iter().map(|d| d.label().to_string()).collect(),
        };

        let mut updated = self.custom.clone();
        updated
            .0
            .entry(category.id.to_string())
            .or_default()
            .push(item.clone());
        let payload = serde_json::to_string(&updated)
            .map_err(|e| PlanError::Serialization(e.to_string()))?;
        storage.set(CUSTOM_MENU_ITEMS_KEY, &payload)?;
        self.custom = updated;

        info!(id = %item.id, category = category.id, "added custom menu item");
        self.find_item(&item.id)
            .ok_or_else(|| PlanError::InvalidMenuItem(format!("'{}' was not saved", item.id)))
    }
}

/// A named preset menu, grouped by category.
#[derive(Debug)]
pub struct OccasionTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub items: &'static [(&'static str, &'static [&'static str])],
}

impl OccasionTemplate {
    /// Every item id in the template, in category order.
    pub fn item_ids(&self) -> impl Iterator<Item = &'static str> {
        self.items.iter().flat_map(|(_, ids)| ids.iter().copied())
    }
}

pub fn categories() -> &'static [MenuCategory] {
    CATEGORIES
}

pub fn category(id: &str) -> Option<&'static MenuCategory> {
    CATEGORIES.iter().find(|c| c.id == id)
}

pub fn templates() -> &'static [OccasionTemplate] {
    TEMPLATES
}

pub fn template(id: &str) -> Option<&'static OccasionTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

static CATEGORIES: &[MenuCategory] = &[
    MenuCategory {
        id: "appetizers",
        icon: "🍽️",
        name: "Appetizers & Starters",
        description: "Light bites to start your event",
        item_names: &[
            "Paneer Tikka", "Hara Bhara Kabab", "Veg Spring Rolls", "Samosa", "Cheese Balls",
            "Corn Tikki", "Aloo Chaat", "Dahi Puri", "Sev Puri", "Pani Puri", "Chilli Paneer",
            "Veg Cutlet", "Masala Papad", "Stuffed Mushrooms", "Mini Dhokla", "Rajma Galouti",
            "Palak Patta Chaat", "Mini Uttapam", "Khandvi", "Paneer Pakora", "Crispy Baby Corn",
        ],
    },
    MenuCategory {
        id: "main-course",
        icon: "🍳",
        name: "Main Course",
        description: "Primary dishes",
        item_names: &[
            "Butter Paneer", "Kadhai Paneer", "Shahi Paneer", "Paneer Lababdar", "Palak Paneer",
            "Paneer Bhurji", "Malai Kofta", "Mix Veg Curry", "Aloo Gobhi", "Bhindi Masala",
            "Baingan Bharta", "Stuffed Capsicum", "Veg Kolhapuri", "Chana Masala", "Dal Makhani",
            "Rajma Masala", "Punjabi Kadhi", "Methi Mutter Malai", "Dum Aloo Kashmiri",
            "Tinde Masala", "Chole", "Bhindi Do Pyaza", "Veg Jalfrezi", "Arbi Curry",
            "Tawa Subzi", "Jeera Aloo", "Corn Palak", "Navratan Korma", "Gatte Ki Sabzi",
        ],
    },
    MenuCategory {
        id: "nonveg",
        icon: "🍗",
        name: "Non-Vegetarian",
        description: "Meat and seafood specialties",
        item_names: &[
            "Butter Chicken", "Chicken Curry", "Chicken Chettinad", "Chicken Do Pyaza",
            "Chicken Tikka Masala", "Chicken Bharta", "Chicken Korma", "Mutton Rogan Josh",
            "Keema Matar", "Mutton Curry", "Fish Curry", "Fish Tikka Masala", "Egg Curry",
            "Egg Masala", "Chicken 65", "Andhra Chicken", "Kadai Mutton", "Laal Maas",
            "Chicken Hyderabadi", "Prawn Curry",
        ],
    },
    MenuCategory {
        id: "breads",
        icon: "🫓",
        name: "Indian Breads",
        description: "Traditional breads and rotis",
        item_names: &[
            "Roti", "Tandoori Roti", "Phulka", "Naan", "Butter Naan", "Garlic Naan",
            "Lachha Paratha", "Plain Paratha", "Stuffed Paratha", "Paneer Kulcha",
            "Missi Roti", "Bhatura", "Poori", "Roomali Roti", "Amritsari Kulcha",
            "Bajra Roti", "Makki Di Roti", "Ajwain Paratha", "Methi Paratha", "Khamiri Roti",
        ],
    },
    MenuCategory {
        id: "rice",
        icon: "🍚",
        name: "Rice Specialties",
        description: "Aromatic rice dishes",
        item_names: &[
            "Steamed Rice", "Jeera Rice", "Peas Pulao", "Veg Pulao", "Tamarind Rice",
            "Curd Rice", "Lemon Rice", "Ghee Rice", "Vegetable Biryani", "Hyderabadi Dum Biryani",
            "Kolkata Biryani", "Paneer Biryani", "Chicken Biryani", "Mutton Biryani",
            "Egg Biryani", "Sindhi Biryani", "Kashmiri Pulao", "Zafrani Pulao", "Kichdi",
            "Schezwan Fried Rice", "Tawa Pulao",
        ],
    },
    MenuCategory {
        id: "desserts",
        icon: "🍰",
        name: "Desserts",
        description: "Sweet endings",
        item_names: &[
            "Gulab Jamun", "Rasgulla", "Rasmalai", "Gajar Ka Halwa", "Moong Dal Halwa",
            "Kheer", "Seviyan", "Phirni", "Malpua", "Basundi", "Ladoo", "Boondi",
            "Jalebi", "Rabri", "Fruit Custard", "Chocolate Mousse", "Ice Cream", "Kulfi",
            "Falooda", "Shahi Tukda", "Barfi", "Kaju Katli", "Besan Ladoo", "Milk Cake",
        ],
    },
    MenuCategory {
        id: "beverages",
        icon: "🥤",
        name: "Beverages",
        description: "Refreshing drinks",
        item_names: &[
            "Masala Chai", "Filter Coffee", "Sweet Lassi", "Salted Lassi", "Mango Lassi",
            "Buttermilk", "Shikanji", "Thandai", "Jaljeera", "Rose Sharbat", "Khus Sharbat",
            "Aam Panna", "Nimbu Pani", "Cold Coffee", "Watermelon Juice", "Orange Juice",
            "Mocktails", "Fruit Punch", "Virgin Mojito", "Kokum Sharbat", "Apple Juice",
        ],
    },
    MenuCategory {
        id: "liveCounters",
        icon: "👨‍🍳",
        name: "Live Stations",
        description: "Interactive cooking experiences",
        item_names: &[
            "Live Chaat Counter", "Pani Puri Station", "Dahi Puri Station",
            "Tandoori Roti Station", "Dosa Counter", "Pav Bhaji Counter", "Chinese Live Wok",
            "Pasta Live Station", "Tawa Sabzi Station", "Paneer Tikka Live Grill",
            "Kathi Roll Counter", "Fried Rice & Manchurian", "Bhatura Live Fry",
            "South Indian Thali Counter",
        ],
    },
];

static TEMPLATES: &[OccasionTemplate] = &[
    OccasionTemplate {
        id: "haldi",
        name: "Haldi Ceremony",
        description: "Traditional pre-wedding Haldi ceremony menu (50-100 guests)",
        items: &[
            ("appetizers", &["paneer-tikka", "samosa", "hara-bhara-kabab"]),
            ("main-course", &["dal-makhani", "mix-veg-curry", "paneer-lababdar"]),
            ("breads", &["naan", "tandoori-roti", "missi-roti"]),
            ("rice", &["jeera-rice", "veg-pulao"]),
            ("desserts", &["gulab-jamun", "rasmalai"]),
            ("beverages", &["masala-chai", "mango-lassi"]),
        ],
    },
    OccasionTemplate {
        id: "mehndi",
        name: "Mehndi Ceremony",
        description: "Festive Mehndi ceremony menu (100-150 guests)",
        items: &[
            ("appetizers", &["dahi-puri", "aloo-chaat", "paneer-pakora"]),
            ("main-course", &["kadhai-paneer", "chole", "dal-makhani"]),
            ("breads", &["butter-naan", "lachha-paratha"]),
            ("rice", &["vegetable-biryani"]),
            ("desserts", &["phirni", "gajar-ka-halwa"]),
            ("beverages", &["thandai", "rose-sharbat"]),
            ("liveCounters", &["pani-puri-station", "dosa-counter"]),
        ],
    },
];
