//! Compiled-in template definitions.
//!
//! Copy is authored for the service's launch market (Russian); tokens from
//! the closed vocabulary (`{{brandName}}`, `{{industryLabel}}`,
//! `{{logoUrl}}`, `{{logoAssetId}}`, `{{slug}}`) are resolved by the
//! generator.

use serde_json::{json, Value};

use crate::config::{
    Page, Palette, Publishing, PublishingConstraints, PublishingOutput, Section,
    SectionType, Theme, Typography,
};

use super::TemplateDefinition;

pub(super) fn all() -> Vec<TemplateDefinition> {
    vec![default_template(), tech_template(), restaurant_template(), retail_template()]
}

fn section(id: &str, section_type: SectionType, props: Value) -> Section {
    Section {
        id: id.to_string(),
        section_type,
        props,
    }
}

fn page(id: &str, path: &str, title: &str, sections: Vec<Section>) -> Page {
    Page {
        id: id.to_string(),
        path: path.to_string(),
        title: title.to_string(),
        sections,
    }
}

fn publishing(entry_page_id: &str) -> Publishing {
    Publishing {
        target: "static".to_string(),
        output: PublishingOutput {
            format: "html".to_string(),
            entry_page_id: entry_page_id.to_string(),
        },
        constraints: PublishingConstraints {
            max_pages: 10,
            max_sections_per_page: 12,
        },
    }
}

fn theme(theme_id: &str, palette: Palette, font_family: &str, radius: &str) -> Theme {
    Theme {
        theme_id: theme_id.to_string(),
        palette,
        typography: Typography {
            font_family: font_family.to_string(),
            scale: "1.25".to_string(),
        },
        radius: radius.to_string(),
        spacing: "16px".to_string(),
    }
}

fn default_template() -> TemplateDefinition {
    TemplateDefinition {
        template_id: "default".to_string(),
        template_version: 1,
        title_suffix: "официальный сайт".to_string(),
        description: "{{brandName}} — {{industryLabel}}. Узнайте больше о нас.".to_string(),
        language: "ru".to_string(),
        theme: theme(
            "classic-light",
            Palette {
                primary: "#2563eb".to_string(),
                accent: "#f59e0b".to_string(),
                background: "#ffffff".to_string(),
                surface: "#f8fafc".to_string(),
                text: "#0f172a".to_string(),
                muted_text: "#64748b".to_string(),
            },
            "Inter, sans-serif",
            "md",
        ),
        pages: vec![
            page(
                "home",
                "/",
                "{{brandName}}",
                vec![
                    section(
                        "hero",
                        SectionType::Hero,
                        json!({
                            "heading": "{{brandName}} — официальный сайт",
                            "subheading": "{{industryLabel}}",
                            "ctaText": "Связаться с нами",
                            "ctaLink": "#contact",
                            "logoUrl": "{{logoUrl}}",
                        }),
                    ),
                    section(
                        "about",
                        SectionType::About,
                        json!({
                            "title": "О компании",
                            "text": "{{brandName}} работает в сфере «{{industryLabel}}» и ценит каждого клиента.",
                        }),
                    ),
                    section(
                        "services",
                        SectionType::Services,
                        json!({
                            "title": "Услуги",
                            "items": [
                                {"title": "Консультация", "text": "Расскажем, с чего начать."},
                                {"title": "Сопровождение", "text": "Останемся на связи после запуска."},
                            ],
                        }),
                    ),
                    section(
                        "contact",
                        SectionType::Contact,
                        json!({
                            "title": "Контакты",
                            "email": "hello@{{slug}}.example",
                            "phone": "+7 (900) 000-00-00",
                        }),
                    ),
                    section(
                        "footer",
                        SectionType::Footer,
                        json!({"text": "© {{brandName}}"}),
                    ),
                ],
            ),
        ],
        publishing: publishing("home"),
    }
}

fn tech_template() -> TemplateDefinition {
    TemplateDefinition {
        template_id: "tech".to_string(),
        template_version: 2,
        title_suffix: "IT-услуги для роста бизнеса".to_string(),
        description: "{{brandName}}: разработка, внедрение и поддержка цифровых продуктов."
            .to_string(),
        language: "ru".to_string(),
        theme: theme(
            "tech-dark",
            Palette {
                primary: "#6366f1".to_string(),
                accent: "#22d3ee".to_string(),
                background: "#0b1020".to_string(),
                surface: "#151b2e".to_string(),
                text: "#e2e8f0".to_string(),
                muted_text: "#94a3b8".to_string(),
            },
            "'JetBrains Mono', monospace",
            "lg",
        ),
        pages: vec![
            page(
                "home",
                "/",
                "{{brandName}} — IT-услуги для роста бизнеса",
                vec![
                    section(
                        "hero",
                        SectionType::Hero,
                        json!({
                            "heading": "{{brandName}} — IT-услуги для роста бизнеса",
                            "subheading": "Разработка под ключ: от идеи до продакшена",
                            "ctaText": "Обсудить проект",
                            "ctaLink": "#contact",
                            "logoUrl": "{{logoUrl}}",
                        }),
                    ),
                    section(
                        "features",
                        SectionType::Features,
                        json!({
                            "title": "Почему {{brandName}}",
                            "items": [
                                {"title": "Скорость", "text": "Первый прототип за две недели."},
                                {"title": "Прозрачность", "text": "Открытые доски задач и демо каждую неделю."},
                                {"title": "Поддержка", "text": "SLA на инциденты и развитие продукта."},
                            ],
                        }),
                    ),
                    section(
                        "services",
                        SectionType::Services,
                        json!({
                            "title": "Что мы делаем",
                            "items": [
                                {"title": "Веб-приложения", "text": "SPA, SSR и интеграции с вашими системами."},
                                {"title": "Мобильные приложения", "text": "iOS и Android из одной кодовой базы."},
                                {"title": "DevOps", "text": "CI/CD, мониторинг, облачная инфраструктура."},
                            ],
                        }),
                    ),
                    section(
                        "testimonials",
                        SectionType::Testimonials,
                        json!({
                            "title": "Отзывы",
                            "items": [
                                {"quote": "Сделали в срок и без сюрпризов.", "author": "Клиент из ритейла"},
                            ],
                        }),
                    ),
                    section(
                        "contact",
                        SectionType::Contact,
                        json!({
                            "title": "Контакты",
                            "email": "team@{{slug}}.example",
                        }),
                    ),
                    section(
                        "footer",
                        SectionType::Footer,
                        json!({"text": "© {{brandName}} — {{industryLabel}}"}),
                    ),
                ],
            ),
            page(
                "pricing",
                "/pricing",
                "Тарифы — {{brandName}}",
                vec![
                    section(
                        "pricing",
                        SectionType::Pricing,
                        json!({
                            "title": "Тарифы",
                            "plans": [
                                {"name": "Старт", "price": "от 150 000 ₽", "features": ["MVP за месяц", "1 итерация правок"]},
                                {"name": "Бизнес", "price": "от 500 000 ₽", "features": ["Полный цикл", "Поддержка 6 месяцев"]},
                            ],
                        }),
                    ),
                    section(
                        "faq",
                        SectionType::Faq,
                        json!({
                            "title": "Вопросы и ответы",
                            "items": [
                                {"question": "Сколько длится проект?", "answer": "Обычно от одного до трёх месяцев."},
                                {"question": "Кому принадлежит код?", "answer": "Вам, целиком и сразу."},
                            ],
                        }),
                    ),
                    section(
                        "footer",
                        SectionType::Footer,
                        json!({"text": "© {{brandName}}"}),
                    ),
                ],
            ),
        ],
        publishing: publishing("home"),
    }
}

fn restaurant_template() -> TemplateDefinition {
    TemplateDefinition {
        template_id: "restaurant".to_string(),
        template_version: 1,
        title_suffix: "кухня, которую запоминают".to_string(),
        description: "{{brandName}} — {{industryLabel}}. Бронируйте стол онлайн.".to_string(),
        language: "ru".to_string(),
        theme: theme(
            "warm-bistro",
            Palette {
                primary: "#b45309".to_string(),
                accent: "#dc2626".to_string(),
                background: "#fffbeb".to_string(),
                surface: "#fef3c7".to_string(),
                text: "#451a03".to_string(),
                muted_text: "#92400e".to_string(),
            },
            "'Playfair Display', serif",
            "full",
        ),
        pages: vec![
            page(
                "home",
                "/",
                "{{brandName}} — кухня, которую запоминают",
                vec![
                    section(
                        "hero",
                        SectionType::Hero,
                        json!({
                            "heading": "{{brandName}} — кухня, которую запоминают",
                            "subheading": "Сезонное меню и локальные продукты",
                            "ctaText": "Забронировать стол",
                            "ctaLink": "#contact",
                            "logoUrl": "{{logoUrl}}",
                        }),
                    ),
                    section(
                        "gallery",
                        SectionType::Gallery,
                        json!({
                            "title": "Атмосфера",
                            "images": ["{{logoUrl}}"],
                        }),
                    ),
                    section(
                        "about",
                        SectionType::About,
                        json!({
                            "title": "О нас",
                            "text": "{{brandName}} — это команда, влюблённая в гастрономию.",
                        }),
                    ),
                    section(
                        "team",
                        SectionType::Team,
                        json!({
                            "title": "Команда",
                            "members": [
                                {"name": "Шеф-повар", "role": "Кухня"},
                                {"name": "Сомелье", "role": "Винная карта"},
                            ],
                        }),
                    ),
                    section(
                        "contact",
                        SectionType::Contact,
                        json!({
                            "title": "Бронирование",
                            "phone": "+7 (900) 000-00-00",
                            "address": "укажите адрес после запуска",
                        }),
                    ),
                    section(
                        "footer",
                        SectionType::Footer,
                        json!({"text": "© {{brandName}}"}),
                    ),
                ],
            ),
        ],
        publishing: publishing("home"),
    }
}

fn retail_template() -> TemplateDefinition {
    TemplateDefinition {
        template_id: "retail".to_string(),
        template_version: 1,
        title_suffix: "магазин рядом с вами".to_string(),
        description: "{{brandName}} — {{industryLabel}}. Акции и новинки каждую неделю.".to_string(),
        language: "ru".to_string(),
        theme: theme(
            "storefront",
            Palette {
                primary: "#059669".to_string(),
                accent: "#f97316".to_string(),
                background: "#ffffff".to_string(),
                surface: "#ecfdf5".to_string(),
                text: "#064e3b".to_string(),
                muted_text: "#6b7280".to_string(),
            },
            "Inter, sans-serif",
            "sm",
        ),
        pages: vec![
            page(
                "home",
                "/",
                "{{brandName}} — магазин рядом с вами",
                vec![
                    section(
                        "hero",
                        SectionType::Hero,
                        json!({
                            "heading": "{{brandName}} — магазин рядом с вами",
                            "subheading": "{{industryLabel}}",
                            "ctaText": "Смотреть каталог",
                            "ctaLink": "#services",
                            "logoUrl": "{{logoUrl}}",
                        }),
                    ),
                    section(
                        "features",
                        SectionType::Features,
                        json!({
                            "title": "Наши преимущества",
                            "items": [
                                {"title": "Доставка", "text": "По городу — в день заказа."},
                                {"title": "Гарантия", "text": "Обмен и возврат без вопросов 30 дней."},
                            ],
                        }),
                    ),
                    section(
                        "services",
                        SectionType::Services,
                        json!({
                            "title": "Каталог",
                            "items": [
                                {"title": "Новинки", "text": "Обновляем каждую неделю."},
                                {"title": "Распродажа", "text": "Скидки до 50%."},
                            ],
                        }),
                    ),
                    section(
                        "contact",
                        SectionType::Contact,
                        json!({
                            "title": "Как нас найти",
                            "email": "shop@{{slug}}.example",
                            "address": "укажите адрес после запуска",
                        }),
                    ),
                    section(
                        "footer",
                        SectionType::Footer,
                        json!({"text": "© {{brandName}}"}),
                    ),
                ],
            ),
        ],
        publishing: publishing("home"),
    }
}
