use super::dom;
use crate::{
    error::SetupError,
    motion::{
        pointer_percent, tilt_transform, AmbientParticle, ParticleConfig, PointerParticle, TILT_RESET,
        TILT_SETTLE_MS,
    },
    pool::{dom_pool, flash, SharedPool, TimerScheduler},
};
use gloo_timers::callback::Timeout;
use std::{cell::RefCell, rc::Rc};
use web_sys::{Element, HtmlElement};
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub repository: Option<&'static str>,
}

pub const PROJECTS: [Project; 3] = [
    Project {
        title: "Personal Portfolio",
        description: "This site: a neon-themed single page with theme switching and pooled background effects.",
        tags: &["Rust", "WebAssembly", "CSS"],
        repository: Some("https://github.com/Mohammadkaleembasha/New-ai-portfolio-"),
    },
    Project {
        title: "PPE Detection",
        description: "Real-time detection of helmets, vests and masks on construction site footage.",
        tags: &["Python", "YOLO", "OpenCV"],
        repository: Some("https://github.com/Mohammadkaleembasha/PPEDETECTION"),
    },
    Project {
        title: "Hyperglycemia Related Retinal Disorder Prediction",
        description: "Classifies fundus images to flag diabetic retinopathy early.",
        tags: &["TensorFlow", "CNN", "Medical Imaging"],
        repository: Some(
            "https://github.com/Mohammadkaleembasha/Hyperglycemia-Related-Retinal-Disorder-Prediction",
        ),
    },
];

#[function_component(Projects)]
pub fn projects() -> Html {
    html! {
        <section id="projects" class="section projects">
            <h2>{"Projects"}</h2>
            <div class="project-grid">
                { for PROJECTS.iter().map(|project| html! { <ProjectCard project={project.clone()} /> }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProjectCardProps {
    pub project: Project,
}

#[function_component(ProjectCard)]
pub fn project_card(props: &ProjectCardProps) -> Html {
    let card_ref = use_node_ref();
    let transform = use_state_eq(|| TILT_RESET.to_string());
    let settling = use_state_eq(|| false);

    let onmousemove = {
        let card_ref = card_ref.clone();
        let transform = transform.clone();
        Callback::from(move |event: MouseEvent| {
            let Some(card) = card_ref.cast::<Element>() else {
                return;
            };
            let rect = dom::rect_of(&card);
            transform.set(tilt_transform(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                rect,
            ));
        })
    };

    let onmouseleave = {
        let transform = transform.clone();
        let settling = settling.clone();
        Callback::from(move |_: MouseEvent| {
            transform.set(TILT_RESET.to_string());
            settling.set(true);
            let settling = settling.clone();
            Timeout::new(TILT_SETTLE_MS, move || settling.set(false)).forget();
        })
    };

    let on_view = {
        let project = props.project.clone();
        Callback::from(move |_: MouseEvent| open_project(&project))
    };

    let style = if *settling {
        format!("transform: {}; transition: transform 0.3s ease", *transform)
    } else {
        format!("transform: {}", *transform)
    };

    html! {
        <article class="project-card" ref={card_ref} style={style} onmousemove={onmousemove} onmouseleave={onmouseleave}>
            <ParticleField />
            <div class="project-info">
                <h3>{props.project.title}</h3>
                <p>{props.project.description}</p>
                <ul class="project-tags">
                    { for props.project.tags.iter().map(|tag| html! { <li>{*tag}</li> }) }
                </ul>
                <button type="button" class="view-project" onclick={on_view}>{"View Project"}</button>
            </div>
        </article>
    }
}

fn open_project(project: &Project) {
    let result = dom::window().and_then(|window| {
        let outcome = match project.repository {
            Some(url) => window.open_with_url_and_target(url, "_blank").map(|_| ()),
            None => window.alert_with_message("Project details would open here!"),
        };
        outcome.map_err(|_| SetupError::dom("open project", project.title))
    });
    dom::report("project link", result);
}

#[derive(Properties, PartialEq)]
pub struct ParticleFieldProps {
    #[prop_or_default]
    pub config: ParticleConfig,
}

/// Ambient particles drifting over a project image, plus pooled bursts that
/// follow the pointer.
#[function_component(ParticleField)]
pub fn particle_field(props: &ParticleFieldProps) -> Html {
    let container_ref = use_node_ref();
    let pool = use_mut_ref(|| None::<SharedPool<HtmlElement>>);
    let ambient = {
        let count = props.config.ambient_count;
        use_state(move || {
            let mut random = dom::random;
            (0..count)
                .map(|_| AmbientParticle::generate(&mut random))
                .collect::<Vec<_>>()
        })
    };

    {
        let container_ref = container_ref.clone();
        let pool = pool.clone();
        let capacity = props.config.pool_capacity;
        use_effect_with(capacity, move |capacity| {
            let created = container_ref
                .cast::<Element>()
                .ok_or(SetupError::MissingElement(".particles-container"))
                .and_then(|container| dom_pool(&container, *capacity, "particle pointer-particle"));
            *pool.borrow_mut() = dom::report("pointer particles", created).map(|p| Rc::new(RefCell::new(p)));
            move || {
                pool.borrow_mut().take();
            }
        });
    }

    let onmousemove = {
        let container_ref = container_ref.clone();
        let pool = pool.clone();
        let config = props.config;
        Callback::from(move |event: MouseEvent| {
            let Some(pool) = pool.borrow().clone() else {
                return;
            };
            let Some(container) = container_ref.cast::<Element>() else {
                return;
            };

            let (x, y) = pointer_percent(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                dom::rect_of(&container),
            );
            let mut random = dom::random;
            let Some(particle) = PointerParticle::roll(&config, x, y, &mut random) else {
                return;
            };

            flash(&pool, &TimerScheduler, particle.lifetime_ms(), |element| {
                let size = format!("{:.1}px", particle.size_px);
                dom::set_styles(
                    element,
                    &[
                        ("left", format!("{:.1}%", particle.left_pct).as_str()),
                        ("top", format!("{:.1}%", particle.top_pct).as_str()),
                        ("width", size.as_str()),
                        ("height", size.as_str()),
                        ("background-color", particle.color),
                        ("--drift-x", format!("{:.1}px", particle.drift_x).as_str()),
                        ("--drift-y", format!("{:.1}px", particle.drift_y).as_str()),
                        (
                            "animation",
                            format!("particle-burst {:.2}s ease-out forwards", particle.duration_s).as_str(),
                        ),
                    ],
                );
            });
        })
    };

    html! {
        <div class="project-img-container" onmousemove={onmousemove}>
            <div class="particles-container" ref={container_ref}>
                { for ambient.iter().map(|particle| html! {
                    <div class="particle ambient-particle" style={particle.style()}></div>
                }) }
            </div>
        </div>
    }
}
