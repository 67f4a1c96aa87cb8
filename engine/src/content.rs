use std::collections::HashMap;

pub fn builtin_enemies() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("goblin", include_str!("../content/enemies/goblin.json")),
        (
            "demonspawn_warrior",
            include_str!("../content/enemies/demonspawn_warrior.json"),
        ),
    ])
}

pub fn builtin_weapons() -> &'static str {
    include_str!("../content/weapons/standard.json")
}

pub fn builtin_armor() -> &'static str {
    include_str!("../content/armor/standard.json")
}
