//! Plant table shipped with the planner.

/// `(id, name, companions, avoid)` rows of the built-in catalog.
pub(crate) const BUILTIN_PLANTS: &[(&str, &str, &[&str], &[&str])] = &[
    (
        "tomato",
        "Tomato",
        &["basil", "carrot", "onion", "marigold", "parsley"],
        &["potato", "cabbage", "fennel", "corn"],
    ),
    (
        "basil",
        "Basil",
        &["tomato", "pepper", "lettuce"],
        &["fennel"],
    ),
    (
        "potato",
        "Potato",
        &["beans", "corn", "cabbage", "marigold"],
        &["tomato", "cucumber", "squash"],
    ),
    (
        "cabbage",
        "Cabbage",
        &["onion", "dill", "potato", "beans"],
        &["tomato", "strawberry"],
    ),
    (
        "carrot",
        "Carrot",
        &["onion", "lettuce", "tomato", "peas", "radish"],
        &["dill"],
    ),
    (
        "onion",
        "Onion",
        &["carrot", "cabbage", "tomato", "lettuce"],
        &["beans", "peas"],
    ),
    ("garlic", "Garlic", &["tomato", "cabbage"], &["beans", "peas"]),
    (
        "beans",
        "Bush Beans",
        &["potato", "corn", "cucumber", "carrot"],
        &["onion", "garlic", "fennel"],
    ),
    (
        "peas",
        "Peas",
        &["carrot", "radish", "cucumber"],
        &["onion", "garlic"],
    ),
    (
        "lettuce",
        "Lettuce",
        &["carrot", "radish", "strawberry"],
        &[],
    ),
    (
        "cucumber",
        "Cucumber",
        &["beans", "peas", "dill"],
        &["potato"],
    ),
    ("squash", "Squash", &["corn", "beans"], &["potato"]),
    ("corn", "Corn", &["beans", "squash", "cucumber"], &["tomato"]),
    ("marigold", "Marigold", &["tomato", "potato"], &[]),
    ("dill", "Dill", &["cabbage", "cucumber"], &["carrot"]),
    ("fennel", "Fennel", &[], &["tomato", "beans", "basil"]),
    ("radish", "Radish", &["carrot", "lettuce", "peas"], &[]),
    ("pepper", "Pepper", &["basil", "onion"], &["fennel"]),
    ("parsley", "Parsley", &["tomato"], &[]),
    ("strawberry", "Strawberry", &["lettuce", "onion"], &["cabbage"]),
];
