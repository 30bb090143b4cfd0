use crate::foundation::core::Rgba8Premul;
use xxhash_rust::xxh3::xxh3_64;

const FALLBACK: [[u8; 3]; 6] = [
    [0xc0, 0x39, 0x2b],
    [0x8e, 0x44, 0xad],
    [0xd3, 0x54, 0x00],
    [0x16, 0xa0, 0x85],
    [0xf1, 0xc4, 0x0f],
    [0x7f, 0x8c, 0x8d],
];

/// Display color for a feature or entity name.
///
/// Known chart layers and `Ship` have fixed colors. Any other name maps deterministically onto a
/// small fallback palette so that repeated calls always agree.
pub fn color(name: &str) -> Rgba8Premul {
    match name {
        "Seabed" => Rgba8Premul::opaque(0x1f, 0x4e, 0x79),
        "Land" => Rgba8Premul::opaque(0x6b, 0x8e, 0x3a),
        "Shore" => Rgba8Premul::opaque(0xc8, 0xb5, 0x7a),
        "Shallows" => Rgba8Premul::opaque(0x5d, 0x9c, 0xc9),
        "Rocks" => Rgba8Premul::opaque(0x3b, 0x3b, 0x3b),
        "Ship" => Rgba8Premul::opaque(0xe6, 0x4a, 0x19),
        other => {
            let idx = (xxh3_64(other.as_bytes()) % FALLBACK.len() as u64) as usize;
            let [r, g, b] = FALLBACK[idx];
            Rgba8Premul::opaque(r, g, b)
        }
    }
}

/// Edge color used when outlines are enabled.
pub fn outline() -> Rgba8Premul {
    Rgba8Premul::opaque(0, 0, 0)
}

/// Colors of the depth colorbar, one per bin in the order given.
///
/// Bins are expected shallow-first; bands shade from the shallows color towards the seabed
/// color.
pub fn depth_bands(depths: &[f64]) -> Vec<Rgba8Premul> {
    let deep = color("Seabed");
    let shallow = color("Shallows");
    let n = depths.len();
    (0..n)
        .map(|i| {
            let t = if n <= 1 {
                0.0
            } else {
                (i as f64) / ((n - 1) as f64)
            };
            shallow.lerp(deep, t)
        })
        .collect()
}
