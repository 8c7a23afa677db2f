use super::{dom, observe};
use crate::motion::{parse_percent, SkillAnimationConfig, SkillProgress};
use gloo_timers::callback::{Interval, Timeout};
use web_sys::Element;
use yew::prelude::*;

const SKILL_CATEGORIES: [(&str, &[(&str, &str)]); 3] = [
    (
        "Languages",
        &[("Python", "90%"), ("Java", "80%"), ("JavaScript", "75%"), ("SQL", "70%")],
    ),
    (
        "Machine Learning",
        &[("TensorFlow", "80%"), ("OpenCV", "85%"), ("scikit-learn", "75%")],
    ),
    (
        "Web",
        &[("HTML & CSS", "90%"), ("React", "70%"), ("Flask", "65%")],
    ),
];

#[function_component(Skills)]
pub fn skills() -> Html {
    let started = use_state_eq(|| false);
    let section_ref = use_node_ref();
    let config = SkillAnimationConfig::default();

    {
        let started = started.setter();
        let section_ref = section_ref.clone();
        use_effect_with((), move |_| {
            let observer = section_ref
                .cast::<Element>()
                .ok_or(crate::error::SetupError::MissingElement("#skills"))
                .and_then(|section| {
                    observe::on_visible(&[section], 0.2, "0px", move |target, observer| {
                        started.set(true);
                        observer.unobserve(target);
                    })
                });
            let observer = dom::report("skills animation", observer);
            move || drop(observer)
        });
    }

    let mut bar_index = 0;
    let categories = SKILL_CATEGORIES.iter().enumerate().map(|(category_index, (title, skills))| {
        let category_style = if *started {
            format!(
                "opacity: 1; transform: translateY(0); transition: opacity 0.5s, transform 0.5s; transition-delay: {}ms",
                category_index * 200 + 50
            )
        } else {
            "opacity: 0; transform: translateY(20px)".to_string()
        };
        let title_style = format!(
            "opacity: 0; animation: fadeInLeft {:.1}s forwards {:.1}s",
            0.3 + category_index as f64 * 0.1,
            0.5 + category_index as f64 * 0.1
        );

        let bars = skills.iter().map(|(name, level)| {
            let index = bar_index;
            bar_index += 1;
            html! {
                <SkillBar name={*name} level={*level} index={index} started={*started} config={config} />
            }
        });

        html! {
            <div class="skill-category" style={category_style}>
                <h3 style={title_style}>{*title}</h3>
                { for bars.collect::<Vec<_>>() }
            </div>
        }
    });

    html! {
        <section id="skills" class="section skills" ref={section_ref}>
            <h2>{"Skills"}</h2>
            <div class="skills-grid">
                { for categories.collect::<Vec<_>>() }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct SkillBarProps {
    pub name: AttrValue,
    /// Target width as written in the markup, e.g. `"85%"`.
    pub level: AttrValue,
    pub index: usize,
    pub started: bool,
    #[prop_or_default]
    pub config: SkillAnimationConfig,
}

#[function_component(SkillBar)]
pub fn skill_bar(props: &SkillBarProps) -> Html {
    let progress = {
        let target = parse_percent(&props.level);
        let steps = props.config.steps;
        use_state_eq(move || SkillProgress::new(target, steps))
    };
    let ticker = use_mut_ref(|| None::<Interval>);

    {
        let progress = progress.setter();
        let ticker = ticker.clone();
        let target = parse_percent(&props.level);
        let config = props.config;
        let delay = config.start_after_ms(props.index);

        use_effect_with(props.started, move |started| {
            let cleanup_ticker = ticker.clone();
            let pending = started.then(|| {
                Timeout::new(delay, move || {
                    let mut current = SkillProgress::new(target, config.steps);
                    let slot = ticker.clone();
                    let interval = Interval::new(config.tick_ms(), move || {
                        current.advance();
                        progress.set(current);
                        if current.is_done() {
                            // The interval cannot drop itself from inside its own callback.
                            let slot = slot.clone();
                            Timeout::new(0, move || drop(slot.borrow_mut().take())).forget();
                        }
                    });
                    *ticker.borrow_mut() = Some(interval);
                })
            });

            move || {
                drop(pending);
                cleanup_ticker.borrow_mut().take();
            }
        });
    }

    let bar_style = if progress.is_done() {
        format!("width: {:.2}%; animation: pulse 3s infinite", progress.width())
    } else {
        format!("width: {:.2}%", progress.width())
    };

    html! {
        <div class="skill">
            <div class="skill-info">
                <span class="skill-name">{props.name.clone()}</span>
                <span class="skill-level">{progress.label()}</span>
            </div>
            <div class="skill-progress" data-width={props.level.clone()}>
                <div class="skill-progress-bar" style={bar_style}></div>
            </div>
        </div>
    }
}
