pub mod weather_analyzer;

pub use weather_analyzer::{MonthlyDelta, TemperatureExtremes, WeatherAnalyzer, WeatherSummary};
