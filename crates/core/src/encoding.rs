//! Categorical encoding and the qualitative color map used for locations

use serde::Serialize;

/// Distinct string values mapped to small integer codes
///
/// Categories are sorted; `codes[i]` is the index of row `i`'s value in
/// `categories`, or `None` when the row has no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Categorical {
    pub categories: Vec<String>,
    pub codes: Vec<Option<usize>>,
}

impl Categorical {
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let values: Vec<Option<&str>> = values.into_iter().collect();

        let mut categories: Vec<String> = values.iter().flatten().map(|s| s.to_string()).collect();
        categories.sort();
        categories.dedup();

        let codes = values
            .iter()
            .map(|v| v.and_then(|s| categories.binary_search_by(|c| c.as_str().cmp(s)).ok()))
            .collect();

        Self { categories, codes }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Distinct values in first-appearance order
pub fn first_appearance<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut seen: Vec<String> = Vec::new();
    for value in values.into_iter().flatten() {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// The 12-color "Set3" qualitative palette
pub const SET3: [Rgb; 12] = [
    Rgb(141, 211, 199),
    Rgb(255, 255, 179),
    Rgb(190, 186, 218),
    Rgb(251, 128, 114),
    Rgb(128, 177, 211),
    Rgb(253, 180, 98),
    Rgb(179, 222, 105),
    Rgb(252, 205, 229),
    Rgb(217, 217, 217),
    Rgb(188, 128, 189),
    Rgb(204, 235, 197),
    Rgb(255, 237, 111),
];

/// Resample `SET3` to `n` colors, evenly spaced across the palette
///
/// Fewer than 12 categories pick spread-out entries; more than 12 repeat
/// entries in order.
pub fn color_map(n: usize) -> Vec<Rgb> {
    match n {
        0 => Vec::new(),
        1 => vec![SET3[0]],
        n => (0..n)
            .map(|i| {
                let position = i as f64 / (n - 1) as f64;
                let idx = ((position * SET3.len() as f64) as usize).min(SET3.len() - 1);
                SET3[idx]
            })
            .collect(),
    }
}
