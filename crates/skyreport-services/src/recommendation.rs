//! Astrophotography recommendation text.
//!
//! Rules are checked in order and the first match wins, so heavy cloud
//! always outranks sky darkness.

use skyreport_sky::SkyDarkness;
use skyreport_weather::{CloudInfo, Temperature};

/// Above this cloud cover nothing else matters.
const POOR_CLOUD_ABOVE: u8 = 50;
/// From this Bortle class up, only bright targets are worthwhile.
const LIGHT_LIMITED_BORTLE: u8 = 7;
const DARK_SKY_BORTLE: u8 = 3;
const EXCELLENT_CLOUD_MAX: u8 = 20;
const GOOD_CLOUD_MAX: u8 = 30;

pub fn recommend(cloud: &CloudInfo, sky: &SkyDarkness, temperature: &Temperature) -> String {
    if cloud.percentage > POOR_CLOUD_ABOVE {
        return "Poor conditions for astrophotography due to high cloud coverage. \
                Consider waiting for clearer skies."
            .to_string();
    }

    if sky.bortle_scale >= LIGHT_LIMITED_BORTLE {
        return format!(
            "Sky conditions: {} with {}% clouds. However, significant light pollution \
             (Bortle {}) will limit deep sky photography. Consider targeting brighter \
             objects like the Moon or planets.",
            cloud.condition, cloud.percentage, sky.bortle_scale
        );
    }

    if sky.bortle_scale <= DARK_SKY_BORTLE && cloud.percentage <= EXCELLENT_CLOUD_MAX {
        return format!(
            "Excellent conditions! {} skies with minimal light pollution (Bortle {}). \
             Perfect for deep sky astrophotography. Temperature: {:.1}°C - dress warmly!",
            cloud.condition, sky.bortle_scale, temperature.celsius
        );
    }

    if cloud.percentage <= GOOD_CLOUD_MAX {
        return format!(
            "Good conditions for astrophotography. {} skies with {} light pollution \
             (Bortle {}). Temperature: {:.1}°C.",
            cloud.condition, sky.level, sky.bortle_scale, temperature.celsius
        );
    }

    format!(
        "Moderate conditions. {}% cloud coverage with {} light pollution. \
         Some astrophotography possible but conditions could be better.",
        cloud.percentage, sky.level
    )
}
