//! Built-in country table: (canonical, localized, english, display).

pub(super) const BUILTIN: &[(&str, &str, &str, &str)] = &[
    ("AUT", "Austria", "Austria", "Austria"),
    ("BEL", "Bélgica", "Belgium", "Belgium"),
    ("BGR", "Bulgaria", "Bulgaria", "Bulgaria"),
    ("HRV", "Croacia", "Croatia", "Croatia"),
    ("CYP", "Chipre", "Cyprus", "Cyprus"),
    ("CZE", "República Checa", "Czechia", "Czech Republic"),
    ("DNK", "Dinamarca", "Denmark", "Denmark"),
    ("EST", "Estonia", "Estonia", "Estonia"),
    ("FIN", "Finlandia", "Finland", "Finland"),
    ("FRA", "Francia", "France", "France"),
    ("DEU", "Alemania", "Germany", "Germany"),
    ("GRC", "Grecia", "Greece", "Greece"),
    ("HUN", "Hungría", "Hungary", "Hungary"),
    ("IRL", "Irlanda", "Ireland", "Ireland"),
    ("ITA", "Italia", "Italy", "Italy"),
    ("LVA", "Letonia", "Latvia", "Latvia"),
    ("LTU", "Lituania", "Lithuania", "Lithuania"),
    ("LUX", "Luxemburgo", "Luxembourg", "Luxembourg"),
    ("MLT", "Malta", "Malta", "Malta"),
    ("NLD", "Países Bajos", "Netherlands", "Netherlands"),
    ("POL", "Polonia", "Poland", "Poland"),
    ("PRT", "Portugal", "Portugal", "Portugal"),
    ("ROU", "Rumanía", "Romania", "Romania"),
    ("SVK", "Eslovaquia", "Slovakia", "Slovakia"),
    ("SVN", "Eslovenia", "Slovenia", "Slovenia"),
    ("ESP", "España", "Spain", "Spain"),
    ("SWE", "Suecia", "Sweden", "Sweden"),
    ("GBR", "Reino Unido", "United Kingdom", "United Kingdom"),
    ("NOR", "Noruega", "Norway", "Norway"),
    ("CHE", "Suiza", "Switzerland", "Switzerland"),
    ("ISL", "Islandia", "Iceland", "Iceland"),
    ("TUR", "Turquía", "Türkiye", "Turkey"),
    ("USA", "Estados Unidos", "United States", "United States"),
];
