//! Terminal renderer: subscribes to view-state transitions and repaints on
//! every one. Owns all presentation concerns — rounding, unit labels, icon
//! glyphs, and date formatting stay out of the core.

use chrono::Utc;
use skycast_core::{CurrentConditions, ForecastDay, IconKind, ViewState, ViewStateCell};

pub struct Renderer;

impl Renderer {
    /// Subscribe to the cell; every transition prints the matching region.
    pub fn attach(cell: &ViewStateCell) {
        cell.subscribe(|state| match state {
            ViewState::Idle => {}
            ViewState::Loading => println!("Fetching weather..."),
            ViewState::Loaded {
                current,
                forecast,
                forecast_available,
            } => {
                print_current(current);
                if *forecast_available {
                    print_forecast(forecast);
                }
            }
            ViewState::Error { message } => eprintln!("Error: {message}"),
        });
    }
}

fn glyph(kind: IconKind) -> &'static str {
    match kind {
        IconKind::ClearDay => "☀️",
        IconKind::ClearNight => "🌙",
        IconKind::FewCloudsDay => "🌤️",
        IconKind::FewCloudsNight => "☁️",
        IconKind::Cloudy => "☁️",
        IconKind::ShowerRain => "🌧️",
        IconKind::RainDay => "🌦️",
        IconKind::RainNight => "🌧️",
        IconKind::Thunderstorm => "⛈️",
        IconKind::Snow => "❄️",
        IconKind::Mist => "🌫️",
    }
}

fn print_current(current: &CurrentConditions) {
    let place = current
        .location
        .display_name
        .as_deref()
        .unwrap_or("Current location");
    let heading = match current.location.country_code.as_deref() {
        Some(country) => format!("{place}, {country}"),
        None => place.to_string(),
    };

    println!();
    println!(
        "{} {heading} — {}",
        glyph(IconKind::from_code(&current.icon_code)),
        Utc::now().format("%A, %B %e, %Y")
    );
    println!();
    println!("  {}°C  {}", current.temperature_c.round(), current.description);
    println!();
    println!("  Feels like  {}°C", current.feels_like_c.round());
    println!("  Humidity    {}%", current.humidity_pct);
    println!("  Wind        {} m/s", current.wind_speed_ms);
    println!("  Pressure    {} hPa", current.pressure_hpa);
    println!(
        "  Visibility  {:.1} km",
        f64::from(current.visibility_m) / 1000.0
    );
}

fn print_forecast(forecast: &[ForecastDay]) {
    if forecast.is_empty() {
        return;
    }

    println!();
    println!("  Forecast");
    for day in forecast {
        println!(
            "  {}  {} {:>3}°C  {}",
            day.date.format("%a %b %e"),
            glyph(IconKind::from_code(&day.icon_code)),
            day.temperature_c.round(),
            day.description
        );
    }
}
