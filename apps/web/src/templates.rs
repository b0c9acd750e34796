use axum::response::Html;
use exoscope_types::{
    minijinja::{self, Environment},
    rand,
};
use serde::Serialize;

use crate::error::AppError;
use crate::starfield::{STAR_COUNT, Starfield};

const VIEW_WIDTH: f32 = 1280.0;
const VIEW_HEIGHT: f32 = 800.0;

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("form.html", include_str!("../templates/form.html")),
    ("report.html", include_str!("../templates/report.html")),
];

pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    for (name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    Ok(env)
}

/// Wraps a page context with a freshly advanced starfield frame.
#[derive(Serialize)]
struct Page<'a, T: Serialize> {
    backdrop: String,
    #[serde(flatten)]
    page: &'a T,
}

fn backdrop() -> String {
    let mut rng = rand::rng();
    let mut field = Starfield::new(VIEW_WIDTH, VIEW_HEIGHT, STAR_COUNT, &mut rng);
    field.step(&mut rng);
    field.to_svg()
}

pub fn render<T: Serialize>(
    env: &Environment<'static>,
    name: &str,
    page: &T,
) -> Result<Html<String>, AppError> {
    let template = env.get_template(name)?;
    let html = template.render(Page {
        backdrop: backdrop(),
        page,
    })?;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Empty {}

    #[test]
    fn every_template_loads() {
        let env = environment().unwrap();
        for (name, _) in TEMPLATES {
            assert!(env.get_template(name).is_ok(), "{name} missing");
        }
    }

    #[test]
    fn home_embeds_the_backdrop_unescaped() {
        let env = environment().unwrap();
        let Html(html) = render(&env, "home.html", &Empty {}).unwrap();
        assert!(html.contains("<svg"));
        assert!(html.contains(r#"href="/predict""#));
    }
}
