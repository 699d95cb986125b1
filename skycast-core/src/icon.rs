/// Icon categories shared between the core and renderers.
///
/// OpenWeatherMap reports conditions as a closed set of icon codes
/// (`01d`, `01n`, ... `50n`). Renderers pick the actual glyph; this
/// mapping is the contract both sides agree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    ClearDay,
    ClearNight,
    FewCloudsDay,
    FewCloudsNight,
    Cloudy,
    ShowerRain,
    RainDay,
    RainNight,
    Thunderstorm,
    Snow,
    Mist,
}

impl IconKind {
    /// Map an OpenWeatherMap icon code to its category.
    /// Unknown codes fall back to [`IconKind::Cloudy`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "01d" => Self::ClearDay,
            "01n" => Self::ClearNight,
            "02d" => Self::FewCloudsDay,
            "02n" => Self::FewCloudsNight,
            "03d" | "03n" | "04d" | "04n" => Self::Cloudy,
            "09d" | "09n" => Self::ShowerRain,
            "10d" => Self::RainDay,
            "10n" => Self::RainNight,
            "11d" | "11n" => Self::Thunderstorm,
            "13d" | "13n" => Self::Snow,
            "50d" | "50n" => Self::Mist,
            _ => Self::Cloudy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_all_known_codes() {
        let cases = [
            ("01d", IconKind::ClearDay),
            ("01n", IconKind::ClearNight),
            ("02d", IconKind::FewCloudsDay),
            ("02n", IconKind::FewCloudsNight),
            ("03d", IconKind::Cloudy),
            ("03n", IconKind::Cloudy),
            ("04d", IconKind::Cloudy),
            ("04n", IconKind::Cloudy),
            ("09d", IconKind::ShowerRain),
            ("09n", IconKind::ShowerRain),
            ("10d", IconKind::RainDay),
            ("10n", IconKind::RainNight),
            ("11d", IconKind::Thunderstorm),
            ("11n", IconKind::Thunderstorm),
            ("13d", IconKind::Snow),
            ("13n", IconKind::Snow),
            ("50d", IconKind::Mist),
            ("50n", IconKind::Mist),
        ];

        for (code, expected) in cases {
            assert_eq!(IconKind::from_code(code), expected, "code {code}");
        }
    }

    #[test]
    fn unknown_codes_fall_back_to_cloudy() {
        assert_eq!(IconKind::from_code("99x"), IconKind::Cloudy);
        assert_eq!(IconKind::from_code(""), IconKind::Cloudy);
    }
}
