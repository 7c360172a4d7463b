//! EcomDomination landing page.
//! Static sections around the interactive testimonial carousel.

use ecom_domination::{
    components::{render_track, CarouselDots, FaqItem},
    config::{CarouselConfig, CONFIG_SCRIPT_ID, DOT_COUNT, LOOP_LEAD_CARDS, WHATSAPP_URL},
    hooks::use_carousel,
    load_testimonials, looped_track,
    utils::doubled,
};
use gloo_events::EventListener;
use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, Node};
use yew::prelude::*;

const BADGES: [&str; 3] = [
    "Création de Sites Shopify",
    "Création d’Images Produits",
    "Création de Visuels et Vidéos performante",
];

// (logo path, brand name)
const PARTNER_LOGOS: [(&str, &str); 8] = [
    ("/assets/brands/shopify.svg", "Shopify"),
    ("/assets/brands/amazon.svg", "Amazon"),
    ("/assets/brands/nike.svg", "Nike"),
    ("/assets/brands/adidas.svg", "Adidas"),
    ("/assets/brands/zalando.svg", "Zalando"),
    ("/assets/brands/ebay.svg", "eBay"),
    ("/assets/brands/hm.svg", "H&M"),
    ("/assets/brands/ikea.svg", "IKEA"),
];

// (title, description, call to action)
const SERVICES: [(&str, &str, Option<&str>); 6] = [
    (
        "Création de Sites Shopify",
        "Nous construisons des sites e‑commerce professionnels sur Shopify, conçus pour maximiser vos ventes et offrir une expérience d’achat fluide.",
        Some("Parlons de votre site"),
    ),
    (
        "Création d’Images Produits",
        "Nous créons des images de produits professionnelles et percutantes qui séduisent vos clients et boostent vos ventes.",
        Some("Demandez des exemples"),
    ),
    (
        "Des visuels et vidéos qui captent l’attention et stimulent vos ventes !",
        "Images et vidéos performantes pour vos annonces et pages e‑commerce. Chaque visuel est pensé pour l’engagement et la conversion.",
        Some("Discutons de vos visuels"),
    ),
    (
        "Délai rapide",
        "La plupart des demandes sont traitées en quelques jours, sans sacrifier la qualité.",
        None,
    ),
    (
        "Qualité premium",
        "Des standards élevés et une attention aux détails, à chaque résultat.",
        None,
    ),
    (
        "100% à vous",
        "Des créations sur‑mesure, pleinement adaptées et sous votre contrôle.",
        None,
    ),
];

const PROCESS_STEPS: [(&str, &str); 3] = [
    (
        "Obtenez une consultation gratuite sur WhatsApp",
        "Parlez-nous de votre projet en quelques minutes. Audit express et recommandations concrètes, sans rendez-vous ni engagement, disponible 24/7.",
    ),
    (
        "Accompagnement",
        "Nous vous accompagnons de bout en bout dans la création et la croissance de votre e‑commerce : site Shopify soigné, visuels produits qui attirent l’attention et campagnes qui convertissent.",
    ),
    (
        "Résultats",
        "Votre marque e‑commerce passe un cap : conversion qui grimpe, panier moyen qui progresse et acquisition plus rentable.",
    ),
];

const FAQ: [(&str, &str); 5] = [
    (
        "Combien de demandes puis-je soumettre ?",
        "Autant que vous le souhaitez. Nous les traitons une par une afin de garantir la qualité et la régularité des livrables.",
    ),
    (
        "Quel type de travail est inclus ?",
        "Création de sites Shopify, images produits, visuels et vidéos publicitaires, landing pages et optimisation orientée conversion.",
    ),
    (
        "Quel est le délai de livraison ?",
        "La plupart des demandes sont livrées en 24–48h. Les projets plus complexes peuvent demander davantage de temps, nous vous prévenons toujours à l’avance.",
    ),
    (
        "Puis-je mettre en pause ?",
        "Oui. Vous pouvez mettre en pause et reprendre quand vous voulez, sans complexité administrative.",
    ),
    (
        "Et si j’ai besoin de développement aussi ?",
        "Oui. Nous collaborons avec vos développeurs ou nos partenaires pour intégrer et livrer des produits de qualité, de bout en bout.",
    ),
];

/// Carousel tuning from the page's optional JSON script tag.
fn load_carousel_config() -> CarouselConfig {
    let Some(json) = gloo_utils::document()
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|script| script.text_content())
    else {
        return CarouselConfig::default();
    };
    CarouselConfig::from_json(&json).unwrap_or_else(|e| {
        warn!("Ignoring #{}: {}", CONFIG_SCRIPT_ID, e);
        CarouselConfig::default()
    })
}

// ──────────────────────────────────────────────────────────────────────────────
// Header

#[function_component(SiteHeader)]
fn site_header() -> Html {
    let menu_open = use_state_eq(|| false);
    let menu_ref = use_node_ref();

    // Escape and clicks outside the menu close it.
    {
        let menu_open = menu_open.clone();
        let menu_ref = menu_ref.clone();
        use_effect_with(*menu_open, move |open| {
            let listeners = open.then(|| {
                let document = gloo_utils::document();
                let close = menu_open.clone();
                let on_key = EventListener::new(&document, "keydown", move |event| {
                    let escape = event
                        .dyn_ref::<KeyboardEvent>()
                        .map(|e| e.key() == "Escape")
                        .unwrap_or(false);
                    if escape {
                        close.set(false);
                    }
                });
                let on_click = EventListener::new(&document, "mousedown", move |event| {
                    let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                    let inside = menu_ref
                        .get()
                        .map(|menu| menu.contains(target.as_ref()))
                        .unwrap_or(false);
                    if !inside {
                        menu_open.set(false);
                    }
                });
                (on_key, on_click)
            });
            move || drop(listeners)
        });
    }

    let toggle = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    html! {
        <header class="site-header">
            <nav class="top-nav">
                <span class="brand-wordmark">
                    <img class="brand-logo" src="/assets/img/ecom-icon.png" alt="Logo EcomDomination" width="40" height="40" />
                    <span class="brand-ecom">{ "EcomDomination" }</span>
                    <sup class="brand-registered">{ "®" }</sup>
                </span>
                <div class="menu" ref={menu_ref}>
                    <button
                        type="button"
                        class="menu-trigger"
                        aria-haspopup="menu"
                        aria-expanded={(*menu_open).to_string()}
                        aria-controls="topmenu"
                        onclick={toggle}
                    >
                        <span>{ "Menu" }</span>
                        <span class={classes!("chevron", (*menu_open).then_some("open"))} aria-hidden="true" />
                    </button>
                    <div id="topmenu" class={classes!("menu-popover", (*menu_open).then_some("open"))} role="menu">
                        <ul class="menu-list">
                            <li><a href="#services" class="menu-item" role="menuitem">{ "Découvrir nos services" }</a></li>
                            <li><a href="#process" class="menu-item" role="menuitem">{ "Comment ça marche" }</a></li>
                            <li><a href="#faq" class="menu-item" role="menuitem">{ "FAQ" }</a></li>
                            <li>
                                <a href={WHATSAPP_URL} class="menu-item" role="menuitem" target="_blank" rel="noopener noreferrer">
                                    { "WhatsApp" }
                                </a>
                            </li>
                        </ul>
                    </div>
                </div>
            </nav>
            <Hero />
        </header>
    }
}

#[function_component(Hero)]
fn hero() -> Html {
    // Badges are doubled so the CSS marquee loops without a seam.
    let badges = doubled(&BADGES)
        .into_iter()
        .enumerate()
        .map(|(i, badge)| html! { <span key={i} class="badge">{ badge }</span> })
        .collect::<Html>();

    html! {
        <div class="hero">
            <div class="badge-slider">
                <div class="badge-track">{ badges }</div>
            </div>
            <h1 class="hero-title">
                { "Nous vous aidons à bâtir une " }
                <span class="accent">{ "marque e-commerce" }</span>
                { " solide et à maximiser vos ventes !" }
            </h1>
            <p class="hero-subtitle">
                { "Chez EcomDomination, nous vous accompagnons de A à Z dans la création et le développement de votre e-commerce." }
            </p>
            <div class="hero-actions">
                <a href="#services" class="btn-primary">{ "Voir nos services" }</a>
                <a href={WHATSAPP_URL} class="btn-secondary" target="_blank" rel="noopener noreferrer">
                    <span class="cta-title">{ "Obtenez une consultation gratuite" }</span>
                    <span class="cta-sub"><span class="cta-dot" />{ "sur WhatsApp" }</span>
                </a>
            </div>
        </div>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Static sections

fn render_partners() -> Html {
    html! {
        <section class="partners-section">
            <span class="partners-lead">
                { "De grandes marques nous font confiance" }<br />{ "partout dans le monde" }
            </span>
            <div class="partner-slider">
                <div class="partner-track">
                    { for doubled(&PARTNER_LOGOS).into_iter().enumerate().map(|(i, (src, alt))| html! {
                        <span key={i} class="partner-logo" aria-hidden="true">
                            <img {src} {alt} />
                        </span>
                    }) }
                </div>
            </div>
        </section>
    }
}

fn render_services() -> Html {
    html! {
        <section class="services-section" id="services">
            <span class="services-pill">{ "Services" }</span>
            <h2 class="services-title"><em>{ "Nos services" }</em>{ " pour propulser votre e-commerce" }</h2>
            <div class="services-grid">
                { for SERVICES.iter().map(|(title, desc, cta)| html! {
                    <article class="service-card">
                        <h3 class="service-title">{ *title }</h3>
                        <p class="service-desc">{ *desc }</p>
                        if let Some(cta) = cta {
                            <a class="service-cta" href={WHATSAPP_URL} target="_blank" rel="noopener noreferrer">{ *cta }</a>
                        }
                    </article>
                }) }
            </div>
        </section>
    }
}

fn render_process() -> Html {
    html! {
        <section class="process-section" id="process">
            <span class="process-pill">{ "Comment ça marche" }</span>
            <h2 class="process-title">
                { "Découvrez un " }<em>{ "processus clair" }</em>{ " pour un e-commerce professionnel et rentable." }
            </h2>
            <div class="process-grid">
                { for PROCESS_STEPS.iter().enumerate().map(|(i, (title, body))| html! {
                    <article class="process-card">
                        <span class="process-step">{ format!("0{}", i + 1) }</span>
                        <h3>{ *title }</h3>
                        <p>{ *body }</p>
                    </article>
                }) }
            </div>
        </section>
    }
}

fn render_footer() -> Html {
    html! {
        <footer class="site-footer" aria-label="Pied de page">
            <div class="footer-left">{ "EcomDomination" }<sup>{ "®" }</sup></div>
            <nav class="footer-right" aria-label="Liens de pied de page">
                <a href="#services" class="footer-link">{ "Services" }</a>
                <a href="#mentions-legales" class="footer-link">{ "Mentions légales" }</a>
                <a href={WHATSAPP_URL} class="footer-link footer-whatsapp" target="_blank" rel="noopener noreferrer">{ "WhatsApp" }</a>
            </nav>
        </footer>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Testimonials

#[function_component(TestimonialsCarousel)]
fn testimonials_carousel() -> Html {
    let cards = use_memo((), |_| looped_track(&load_testimonials(), LOOP_LEAD_CARDS));
    let config = use_memo((), |_| load_carousel_config());
    let carousel = use_carousel(DOT_COUNT, *config);

    html! {
        <section class="testimonials-section" id="testimonials">
            <span class="testimonials-pill">{ "Témoignages" }</span>
            <h2 class="process-title">{ "Ils aiment quand c'est" }<em>{ " bien fait." }</em></h2>
            <div class="testimonials-carousel">
                <div
                    class="testimonials-track"
                    ref={carousel.track_ref.clone()}
                    onscroll={carousel.onscroll.clone()}
                    onpointerdown={carousel.onpointerdown.clone()}
                    onpointermove={carousel.onpointermove.clone()}
                    onpointerup={carousel.onpointerup.clone()}
                    onpointercancel={carousel.onpointercancel.clone()}
                >
                    { render_track(&cards) }
                </div>
            </div>
            <CarouselDots
                count={DOT_COUNT}
                active={carousel.active_index}
                onselect={carousel.scroll_to_index.clone()}
            />
        </section>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// FAQ

#[function_component(Faq)]
fn faq() -> Html {
    let open_index = use_state_eq(|| None::<usize>);

    html! {
        <section class="faq-section" id="faq" aria-labelledby="faq-title">
            <span class="faq-badge">{ "FAQ" }</span>
            <h2 id="faq-title" class="faq-title">{ "Ce que se demandent souvent nos clients" }</h2>
            <div class="faq-contact">
                <span class="faq-email-label">{ "Email" }</span>
                <span class="faq-email-value">{ "contact@ecomdomination.com" }</span>
                <a href={WHATSAPP_URL} class="faq-cta">{ "Commencez votre consultation" }</a>
            </div>
            <div class="faq-list" role="list">
                { for FAQ.iter().enumerate().map(|(i, (question, answer))| {
                    let open = *open_index == Some(i);
                    let ontoggle = {
                        let open_index = open_index.clone();
                        Callback::from(move |_: ()| open_index.set(if open { None } else { Some(i) }))
                    };
                    html! {
                        <FaqItem key={i} question={*question} answer={*answer} {open} {ontoggle} />
                    }
                }) }
            </div>
        </section>
    }
}

#[function_component]
pub fn App() -> Html {
    html! {
        <div class="page">
            <SiteHeader />
            <main>
                { render_partners() }
                { render_services() }
                { render_process() }
                <TestimonialsCarousel />
                <Faq />
            </main>
            { render_footer() }
        </div>
    }
}

/// Entry point: logging, panic hook, then the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("error initializing log");
    info!("Starting EcomDomination landing page");
    yew::Renderer::<App>::new().render();
}
