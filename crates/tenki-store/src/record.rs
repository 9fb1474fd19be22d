use tenki_jma::DisplayLine;

/// One row to be appended to the weather table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRecord {
    pub city: String,
    pub temperature: Option<i64>,
    pub condition: String,
    pub date: String,
}

impl WeatherRecord {
    /// Derive a record from an extracted display line.
    ///
    /// The upstream source coerced the first weather token to an integer
    /// and raised on the (typical) descriptive text. Here the token is
    /// parsed leniently: non-numeric text stores NULL, and the raw text is
    /// always kept in `condition`. The date column is the literal "Today",
    /// a simplification inherited from the source schema.
    pub fn from_display_line(line: &DisplayLine) -> Self {
        let temperature = line.text.lines().next().and_then(|t| t.trim().parse::<i64>().ok());

        Self {
            city: line.area_name.clone(),
            temperature,
            condition: line.text.clone(),
            date: "Today".to_string(),
        }
    }
}
