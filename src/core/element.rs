/// Sentinel element for components that match no recognized element (water, etc.)
pub const UNCLASSIFIED: &str = "XX";

/// Pseudo-element used for the electron
pub const ELECTRON: &str = "e-";

/// Canonical element order used when writing a catalog.
///
/// The electron comes first, followed by the periodic table in order of
/// atomic number. `XX` is deliberately absent: it is always written last.
pub const KNOWN_ELEMENTS: &[&str] = &[
    ELECTRON, "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P",
    "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga",
    "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag",
    "Cd", "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu",
    "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au",
    "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am",
    "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg",
    "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Whether `symbol` is one of the canonical element symbols (exact case).
#[must_use]
pub fn is_known_element(symbol: &str) -> bool {
    KNOWN_ELEMENTS.contains(&symbol)
}

/// Whether `symbol` may label a catalog line: a known element or `XX`.
#[must_use]
pub fn is_catalog_symbol(symbol: &str) -> bool {
    symbol == UNCLASSIFIED || is_known_element(symbol)
}

/// The symbol an entry is grouped under when written: itself if known, `XX` otherwise.
#[must_use]
pub fn group_symbol(symbol: &str) -> &str {
    if is_known_element(symbol) {
        symbol
    } else {
        UNCLASSIFIED
    }
}
