//! Pure Yew view components for the landing page.
//!
//! These render from props only; the carousel state lives in
//! [`crate::hooks::use_carousel`].

use crate::{Testimonial, TrackCard};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TestimonialCardProps {
    pub testimonial: Testimonial,
    #[prop_or_default]
    pub duplicate: bool,
}

#[function_component(TestimonialCard)]
pub fn testimonial_card(props: &TestimonialCardProps) -> Html {
    let t = &props.testimonial;
    let class = classes!("testimonial-card", t.ghost.then_some("ghost"));
    html! {
        <article {class} aria-hidden={props.duplicate.then_some("true")} draggable="false">
            <div class="t-head">
                <img class="t-avatar" src={t.avatar.clone()} alt="Client" draggable="false" />
                <div class="t-meta">
                    <strong class="t-name">{ t.name.clone() }</strong>
                    <span class="t-role">{ t.role.clone() }</span>
                </div>
            </div>
            <p class="t-quote">{ t.quote.clone() }</p>
        </article>
    }
}

/// Renders every card slot of the track, duplicates included.
pub fn render_track(cards: &[TrackCard]) -> Html {
    cards
        .iter()
        .map(|card| {
            html! {
                <TestimonialCard
                    key={card.key.clone()}
                    testimonial={card.testimonial.clone()}
                    duplicate={card.duplicate}
                />
            }
        })
        .collect::<Html>()
}

/// Page indicators; the active one gets the pop animation.
#[derive(Properties, PartialEq)]
pub struct CarouselDotsProps {
    pub count: usize,
    pub active: usize,
    pub onselect: Callback<usize>,
}

#[function_component(CarouselDots)]
pub fn carousel_dots(props: &CarouselDotsProps) -> Html {
    html! {
        <div class="testimonials-dots" aria-label="Contrôles du carousel d'avis" role="tablist">
            { (0..props.count).map(|i| {
                let is_active = i == props.active;
                let onclick = props.onselect.reform(move |_: MouseEvent| i);
                html! {
                    <span
                        key={i}
                        class={classes!("dot", is_active.then_some(classes!("active", "dot-pop")))}
                        role="tab"
                        aria-selected={is_active.to_string()}
                        aria-controls={format!("slide-{}", i)}
                        {onclick}
                    />
                }
            }).collect::<Html>() }
        </div>
    }
}

/// One FAQ entry; the parent decides which one is open.
#[derive(Properties, PartialEq)]
pub struct FaqItemProps {
    pub question: AttrValue,
    pub answer: AttrValue,
    pub open: bool,
    pub ontoggle: Callback<()>,
}

#[function_component(FaqItem)]
pub fn faq_item(props: &FaqItemProps) -> Html {
    let onclick = props.ontoggle.reform(|_: MouseEvent| ());
    html! {
        <div class={classes!("faq-item", props.open.then_some("open"))}>
            <button class="faq-question" aria-expanded={props.open.to_string()} {onclick}>
                <span>{ props.question.to_string() }</span>
                <span class="faq-icon">{ if props.open { "−" } else { "+" } }</span>
            </button>
            if props.open {
                <p class="faq-answer">{ props.answer.to_string() }</p>
            }
        </div>
    }
}
