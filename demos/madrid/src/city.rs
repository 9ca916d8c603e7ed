//! Synthetic Madrid-like city fixture.
//!
//! Hospital coordinates are km offsets from Puerta del Sol; district
//! surface and density figures follow the 21 Madrid districts.  Since real
//! district boundaries are not bundled, geometry is a 7×3 rectangle grid
//! covering the metro area — every hospital falls inside some cell.

use std::collections::BTreeMap;

use ems_core::DistrictCode;
use ems_env::{
    CityConfig, DistrictConfig, DistrictRing, HospitalConfig, SeverityConfig, TrafficConfig,
};

/// `(name, x_km, y_km, fleet_size)`
const HOSPITALS: [(&str, f64, f64, u32); 17] = [
    ("Alcalá de Henares (Ppe. de Asturias)", 29.814, 10.59, 2),
    ("Central de la Defensa", -3.849, -2.765, 2),
    ("Clínico San Carlos", -1.593, 2.937, 4),
    ("Concepción (Fund. J. Díaz)", -1.596, 2.718, 2),
    ("Doce de Octubre", 0.147, -4.271, 4),
    ("Doctor Rodriguez Lafora", 0.786, 13.054, 2),
    ("Getafe", -3.506, -11.325, 3),
    ("Gregorio Marañón", 2.59, 0.523, 4),
    ("Infanta Leonor", 7.038, -3.105, 2),
    ("La Paz", 1.13, 7.416, 4),
    ("La Princesa", 2.181, 2.189, 3),
    ("Moncloa (ASISA)", -2.914, 2.06, 2),
    ("Niño Jesús (Infantil)", 2.123, 0.007, 2),
    ("Puerta de Hierro", -14.652, 3.992, 3),
    ("Ramón y Cajal", 0.5, 8.142, 3),
    ("Santa Cristina", 2.553, 0.821, 2),
    ("Virgen de la torre", 6.956, -3.685, 2),
];

/// `(name, surface_km2, density)`
const DISTRICTS: [(&str, f64, f64); 21] = [
    ("CENTRO", 5.21, 25340.69),
    ("ARGANZUELA", 6.52, 23306.44),
    ("RETIRO", 5.42, 21867.53),
    ("SALAMANCA", 5.36, 26830.78),
    ("CHAMARTIN", 9.12, 15723.25),
    ("TETUAN", 5.37, 28664.25),
    ("CHAMBERI", 4.73, 29049.26),
    ("FUENCARRAL", 238.0, 1003.0),
    ("MONCLOA", 46.47, 2515.26),
    ("LATINA", 25.47, 9183.75),
    ("CARABANCHEL", 14.1, 17316.88),
    ("USERA", 7.7, 17535.32),
    ("VALLECAS PTE.", 14.84, 15345.01),
    ("MORATALAZ", 6.08, 15493.59),
    ("CIUDAD LINEAL", 11.52, 18455.56),
    ("HORTALEZA", 25.87, 6973.33),
    ("VILLAVERDE", 20.21, 7059.13),
    ("VILLA DE VALLECAS", 51.49, 2026.82),
    ("VICALVARO", 35.36, 1981.11),
    ("SAN BLAS", 22.26, 6934.37),
    ("BARAJAS", 43.56, 1076.06),
];

/// Per-tier base frequencies (emergencies per second at stress 1.0, before
/// calendar factors) and reward weights.  Tier 5 is the rarest and
/// heaviest; at 60-s steps tier 1 averages one call every five minutes.
const SEVERITIES: [(f64, f64); 5] = [
    (0.0033, 1.0),
    (0.0017, 2.0),
    (0.00083, 3.0),
    (0.00033, 4.0),
    (0.00008, 5.0),
];

/// Diurnal shape: overnight trough, morning ramp, evening peak.
const HOURLY: [f64; 24] = [
    0.5, 0.4, 0.35, 0.3, 0.3, 0.4, 0.6, 0.9, 1.1, 1.2, 1.2, 1.2, //
    1.3, 1.2, 1.1, 1.1, 1.2, 1.3, 1.4, 1.5, 1.4, 1.2, 0.9, 0.7,
];

/// Monday..Sunday; weekend nights run hotter.
const WEEKDAY: [f64; 7] = [1.0, 0.95, 0.95, 1.0, 1.15, 1.25, 1.1];

/// Grid extent: 7 columns over x ∈ [-20, 30], 3 rows over y ∈ [-15, 15].
const GRID_COLS: usize = 7;
const GRID_ROWS: usize = 3;
const X_MIN: f64 = -20.0;
const X_MAX: f64 = 30.0;
const Y_MIN: f64 = -15.0;
const Y_MAX: f64 = 15.0;

pub fn config() -> CityConfig {
    let hospitals: BTreeMap<u32, HospitalConfig> = HOSPITALS
        .iter()
        .enumerate()
        .map(|(i, &(name, x, y, fleet_size))| {
            (i as u32 + 1, HospitalConfig { name: name.to_owned(), x, y, fleet_size })
        })
        .collect();

    let districts: BTreeMap<u16, DistrictConfig> = DISTRICTS
        .iter()
        .enumerate()
        .map(|(i, &(name, surface_km2, density))| {
            (i as u16 + 1, DistrictConfig { name: name.to_owned(), surface_km2, density })
        })
        .collect();

    // Every tier shares the same diurnal and weekday shape; district
    // weights are left empty so generation follows resident population.
    let severities = SEVERITIES
        .iter()
        .map(|&(frequency, severity)| SeverityConfig {
            frequency,
            severity,
            hourly_dist: HOURLY.to_vec(),
            daily_dist: WEEKDAY.to_vec(),
            monthly_dist: vec![1.0; 12],
            district_prob: BTreeMap::new(),
        })
        .collect();

    CityConfig {
        step_secs: 60,
        shown_emergencies: 20,
        hospitals,
        districts,
        severities,
        traffic: TrafficConfig::default(),
    }
}

/// One rectangular ring per district, row-major from the south-west corner.
pub fn rings() -> Vec<DistrictRing> {
    let cell_w = (X_MAX - X_MIN) / GRID_COLS as f64;
    let cell_h = (Y_MAX - Y_MIN) / GRID_ROWS as f64;

    (0..GRID_ROWS * GRID_COLS)
        .map(|i| {
            let col = i % GRID_COLS;
            let row = i / GRID_COLS;
            let x0 = X_MIN + col as f64 * cell_w;
            let y0 = Y_MIN + row as f64 * cell_h;
            let ring = vec![
                (x0, y0),
                (x0 + cell_w, y0),
                (x0 + cell_w, y0 + cell_h),
                (x0, y0 + cell_h),
            ];
            (DistrictCode(i as u16 + 1), ring)
        })
        .collect()
}
