//! Backdrop of stars flying towards the viewer.
//!
//! Each page render owns its own [`Starfield`]; nothing is shared between
//! renders.

use exoscope_types::rand::Rng;
use std::fmt::Write;

pub const STAR_COUNT: usize = 400;
pub const STAR_SPEED: f32 = 10.0;
const MAX_RADIUS: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Star {
    x: f32,
    y: f32,
    z: f32,
}

/// A star after perspective projection, relative to the centre of the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedStar {
    pub x: f32,
    pub y: f32,
    pub diameter: f32,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    width: f32,
    height: f32,
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new<R: Rng + ?Sized>(width: f32, height: f32, count: usize, rng: &mut R) -> Self {
        let mut field = Self {
            width,
            height,
            stars: Vec::with_capacity(count),
        };
        for _ in 0..count {
            let star = Star {
                x: rng.random_range(-width..width),
                y: rng.random_range(-height..height),
                z: rng.random_range(0.0..width),
            };
            field.stars.push(star);
        }
        field
    }

    /// Moves every star closer; stars that pass the viewer reappear at the
    /// far plane at a new position.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for star in &mut self.stars {
            star.z -= STAR_SPEED;
            if star.z < 1.0 {
                star.z = self.width;
                star.x = rng.random_range(-self.width..self.width);
                star.y = rng.random_range(-self.height..self.height);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn project(&self) -> impl Iterator<Item = ProjectedStar> + '_ {
        self.stars
            .iter()
            .filter(|star| star.z > 0.0)
            .map(|star| ProjectedStar {
                x: star.x / star.z * self.width,
                y: star.y / star.z * self.height,
                diameter: MAX_RADIUS * (1.0 - star.z / self.width),
            })
    }

    /// One frame as an SVG document, black background, white dots.
    pub fn to_svg(&self) -> String {
        let (half_w, half_h) = (self.width / 2.0, self.height / 2.0);
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" preserveAspectRatio="xMidYMid slice"><rect width="100%" height="100%" fill="black"/>"#,
            self.width, self.height
        );
        for star in self.project() {
            let (cx, cy) = (star.x + half_w, star.y + half_h);
            let visible = star.diameter > 0.0
                && (0.0..=self.width).contains(&cx)
                && (0.0..=self.height).contains(&cy);
            if visible {
                let _ = write!(
                    svg,
                    r#"<circle cx="{:.1}" cy="{:.1}" r="{:.2}" fill="white"/>"#,
                    cx,
                    cy,
                    star.diameter / 2.0
                );
            }
        }
        svg.push_str("</svg>");
        svg
    }
}
