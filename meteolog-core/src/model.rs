use std::fmt;

/// One normalized weather observation, matching the `weather_data` columns.
///
/// Built fresh on every fetch cycle, inserted as one row, then discarded;
/// the program keeps no history in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub temperature: f64,
    pub wind_direction: String,
    pub wind_speed: f64,
    pub pressure: f64,
    pub precipitation_type: String,
    pub precipitation_strength: String,
}

impl fmt::Display for WeatherRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "температура: {}, направление ветра: {}, скорость ветра: {}, \
             давление: {}, тип осадков: {}, количество осадков: {}",
            self.temperature,
            self.wind_direction,
            self.wind_speed,
            self.pressure,
            self.precipitation_type,
            self.precipitation_strength,
        )
    }
}
