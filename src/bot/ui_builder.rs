//! UI Builder module for creating keyboards and formatting captions

use std::sync::Arc;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::html;

// Import localization
use crate::localization::{t_args_lang, t_lang};

// Import catalog types
use crate::catalog_model::{Category, Product};
use crate::navigation::NavigationToken;
use crate::navigator::{ListTitle, ProductDetail, ProductPage, Screen};

/// Category buttons per keyboard row
const CATEGORY_BUTTONS_PER_ROW: usize = 2;

/// Which picture goes with a caption
#[derive(Debug, Clone, PartialEq)]
pub enum ViewPhoto {
    /// The static placeholder image
    Placeholder,
    /// Decoded product image
    Product(Arc<[u8]>),
    /// Keep the picture currently shown and only replace the caption
    Unchanged,
}

/// A screen ready to be handed to Telegram
#[derive(Debug, Clone)]
pub struct CatalogView {
    pub caption: String,
    pub photo: ViewPhoto,
    pub keyboard: InlineKeyboardMarkup,
}

fn nav_button(label: String, token: NavigationToken) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, token.to_string())
}

fn back_row(language_code: Option<&str>) -> Vec<InlineKeyboardButton> {
    vec![nav_button(
        t_lang("nav-back", language_code),
        NavigationToken::Categories,
    )]
}

/// Previous/next row, absent when neither link exists
fn pagination_row(
    previous: Option<NavigationToken>,
    next: Option<NavigationToken>,
    language_code: Option<&str>,
) -> Option<Vec<InlineKeyboardButton>> {
    let mut row = Vec::new();
    if let Some(token) = previous {
        row.push(nav_button(t_lang("nav-previous", language_code), token));
    }
    if let Some(token) = next {
        row.push(nav_button(t_lang("nav-next", language_code), token));
    }
    (!row.is_empty()).then_some(row)
}

/// Build caption, photo and keyboard for any catalog screen
pub fn build_view(screen: &Screen, language_code: Option<&str>) -> CatalogView {
    match screen {
        Screen::CategoryMenu { categories } => build_category_menu(categories, language_code),
        Screen::ProductList(page) => build_product_list(page, language_code),
        Screen::ProductDetail(detail) => build_product_detail(detail, language_code),
    }
}

pub fn build_category_menu(categories: &[Category], language_code: Option<&str>) -> CatalogView {
    if categories.is_empty() {
        return CatalogView {
            caption: t_lang("menu-empty", language_code),
            photo: ViewPhoto::Placeholder,
            keyboard: InlineKeyboardMarkup::new(Vec::<Vec<InlineKeyboardButton>>::new()),
        };
    }

    CatalogView {
        caption: t_lang("menu-title", language_code),
        photo: ViewPhoto::Placeholder,
        keyboard: create_category_menu_keyboard(categories, language_code),
    }
}

/// Category buttons two per row, then the "all products" button
pub fn create_category_menu_keyboard(
    categories: &[Category],
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = categories
        .chunks(CATEGORY_BUTTONS_PER_ROW)
        .map(|chunk| {
            chunk
                .iter()
                .map(|category| {
                    nav_button(
                        category.name.clone(),
                        NavigationToken::Category {
                            category_id: category.id,
                            page: 0,
                        },
                    )
                })
                .collect()
        })
        .collect();

    rows.push(vec![nav_button(
        t_lang("menu-all-products", language_code),
        NavigationToken::AllProducts { page: 0 },
    )]);

    InlineKeyboardMarkup::new(rows)
}

fn list_title_text(title: &ListTitle, language_code: Option<&str>) -> String {
    match title {
        ListTitle::AllProducts => t_lang("list-all-products", language_code),
        ListTitle::Category(name) => html::escape(name),
        ListTitle::UnknownCategory => t_lang("list-unknown-category", language_code),
    }
}

pub fn build_product_list(page: &ProductPage, language_code: Option<&str>) -> CatalogView {
    let category = list_title_text(&page.title, language_code);

    if page.is_empty() {
        return CatalogView {
            caption: t_args_lang("list-empty", &[("category", category.as_str())], language_code),
            photo: ViewPhoto::Unchanged,
            keyboard: InlineKeyboardMarkup::new(vec![back_row(language_code)]),
        };
    }

    let page_number = page.page.saturating_add(1).to_string();
    let caption = t_args_lang(
        "list-title",
        &[("category", category.as_str()), ("page", page_number.as_str())],
        language_code,
    );

    CatalogView {
        caption,
        photo: ViewPhoto::Placeholder,
        keyboard: create_product_list_keyboard(page, language_code),
    }
}

/// One product per row, pagination row, back button
pub fn create_product_list_keyboard(
    page: &ProductPage,
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = page
        .products
        .iter()
        .map(|product| {
            vec![nav_button(
                product.name.clone(),
                NavigationToken::Product {
                    product_id: product.id,
                },
            )]
        })
        .collect();

    if let Some(row) = pagination_row(page.previous, page.next, language_code) {
        rows.push(row);
    }
    rows.push(back_row(language_code));

    InlineKeyboardMarkup::new(rows)
}

/// HTML caption with every product field
pub fn format_product_details(product: &Product, language_code: Option<&str>) -> String {
    let price = product.price.to_string();
    let stock = product.stock.to_string();

    format!(
        "<b>{}</b>\n\n{}\n{}\n{}\n{}\n{}",
        html::escape(&product.name),
        t_args_lang(
            "detail-category",
            &[("category", html::escape(&product.category).as_str())],
            language_code
        ),
        t_args_lang(
            "detail-brand",
            &[("brand", html::escape(&product.brand).as_str())],
            language_code
        ),
        t_args_lang("detail-price", &[("price", price.as_str())], language_code),
        t_args_lang("detail-stock", &[("stock", stock.as_str())], language_code),
        t_args_lang(
            "detail-seller",
            &[("seller", html::escape(&product.seller).as_str())],
            language_code
        ),
    )
}

pub fn build_product_detail(detail: &ProductDetail, language_code: Option<&str>) -> CatalogView {
    let photo = match &detail.product.image_bytes {
        Some(bytes) => ViewPhoto::Product(Arc::clone(bytes)),
        None => ViewPhoto::Placeholder,
    };

    let mut rows = Vec::new();
    if let Some(row) = pagination_row(detail.previous, detail.next, language_code) {
        rows.push(row);
    }
    rows.push(back_row(language_code));

    CatalogView {
        caption: format_product_details(&detail.product, language_code),
        photo,
        keyboard: InlineKeyboardMarkup::new(rows),
    }
}

/// Text for /start and /help
pub fn welcome_message(language_code: Option<&str>) -> String {
    format!(
        "{}\n\n{}\n\n{}\n{}\n{}\n{}",
        t_lang("welcome-title", language_code),
        t_lang("welcome-description", language_code),
        t_lang("commands-title", language_code),
        t_lang("command-start", language_code),
        t_lang("command-catalog", language_code),
        t_lang("command-help", language_code),
    )
}
