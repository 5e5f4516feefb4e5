//! HTML fragments rendered into the page.
//!
//! All interpolated text is escaped; server data never reaches the DOM as
//! markup.

use aa_api_types::{CartItem, Tutorial, TutorialStep};

use crate::format::cart_total_label;

/// Class carried by every per-row remove control in the cart panel.
pub const CART_REMOVE_CLASS: &str = "cart-remove";
/// Class of the "View Tutorial" control inside the teaser card.
pub const TUTORIAL_VIEW_CLASS: &str = "tutorial-view-btn";

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn cart_loading() -> String {
    r#"<div class="cart-loading" style="text-align: center; padding: 40px;">
    <i class="fas fa-spinner fa-spin" style="font-size: 2rem; color: #999;"></i>
</div>"#
        .to_owned()
}

pub fn cart_empty() -> String {
    r#"<div class="cart-empty" style="text-align: center; padding: 40px;">
    <i class="fas fa-shopping-cart" style="font-size: 4rem; color: #ddd; margin-bottom: 20px;"></i>
    <h3>Your cart is empty</h3>
    <p style="color: #666;">Start shopping to add items to your cart</p>
    <a href="/products" class="btn btn-primary" style="margin-top: 20px;">
        <i class="fas fa-shopping-bag"></i> Continue Shopping
    </a>
</div>"#
        .to_owned()
}

pub fn cart_error() -> String {
    r#"<div class="cart-error" style="text-align: center; padding: 40px; color: #d9534f;">
    <i class="fas fa-exclamation-triangle" style="font-size: 4rem; margin-bottom: 20px;"></i>
    <h3>Error loading cart</h3>
    <p>Please try again later</p>
</div>"#
        .to_owned()
}

fn cart_row(item: &CartItem) -> String {
    format!(
        r#"<div class="cart-item" style="display:flex;justify-content:space-between;align-items:center;padding:10px;border-bottom:1px solid #eee;">
    <div>
        <strong>{name}</strong><br>
        <span>{quantity} × ₹{price} = ₹{total}</span>
    </div>
    <button class="btn btn-danger btn-sm {remove_class}" data-cart-item-id="{id}">Remove</button>
</div>"#,
        name = escape_html(&item.name),
        quantity = item.quantity,
        price = item.price,
        total = item.total_price,
        remove_class = CART_REMOVE_CLASS,
        id = item.cart_item_id,
    )
}

pub fn cart_items(items: &[CartItem], total: f64) -> String {
    let mut html: String = items.iter().map(cart_row).collect();
    html.push_str(&format!(
        r#"<div class="cart-summary" style="margin-top:20px; text-align:right;">
    <h4>Total: {}</h4>
    <button class="btn btn-success">Proceed to Checkout</button>
</div>"#,
        cart_total_label(total)
    ));
    html
}

pub fn tutorial_ready() -> String {
    format!(
        r#"<div style="text-align: center; padding: 40px;">
    <i class="fas fa-wand-magic-sparkles" style="font-size: 4rem; color: var(--accent); margin-bottom: 20px;"></i>
    <h3>AI Tutorial Generated</h3>
    <p style="color: #666;">Click the button below to view the step-by-step tutorial</p>
    <button class="btn btn-primary {TUTORIAL_VIEW_CLASS}" style="margin-top: 20px;">
        <i class="fas fa-eye"></i> View Tutorial
    </button>
</div>"#
    )
}

pub fn difficulty_color(difficulty: &str) -> &'static str {
    match difficulty {
        "beginner" => "var(--success)",
        "intermediate" => "var(--warning)",
        _ => "var(--danger)",
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn material_chip(material: &str) -> String {
    format!(
        r#"<span style="background: var(--light); padding: 8px 15px; border-radius: 20px;">
    <i class="fas fa-check-circle" style="color: var(--success);"></i> {}
</span>"#,
        escape_html(material)
    )
}

fn step_tips(tips: &[String]) -> String {
    if tips.is_empty() {
        return String::new();
    }
    let items: String = tips
        .iter()
        .map(|tip| format!(r#"<li style="margin-bottom: 5px;">{}</li>"#, escape_html(tip)))
        .collect();
    format!(
        r#"<div class="step-tips" style="background: rgba(255, 255, 255, 0.5); padding: 15px; border-radius: 6px; border-left: 4px solid var(--accent);">
    <h5 style="margin: 0 0 10px 0; color: var(--dark);">
        <i class="fas fa-lightbulb" style="color: var(--warning);"></i> Pro Tips
    </h5>
    <ul style="margin: 0; color: #666;">{items}</ul>
</div>"#
    )
}

fn tutorial_step(step: &TutorialStep) -> String {
    format!(
        r#"<div class="tutorial-step" style="background: var(--light); padding: 25px; border-radius: 8px; margin-bottom: 20px;">
    <div style="display: flex; align-items: center; gap: 15px; margin-bottom: 15px;">
        <div style="background: var(--accent); color: white; width: 40px; height: 40px; border-radius: 50%; display: flex; align-items: center; justify-content: center; font-weight: bold;">{number}</div>
        <h4 style="margin: 0; color: var(--dark);">{title}</h4>
    </div>
    <p style="color: #666; margin-bottom: 15px; line-height: 1.6;">{description}</p>
    {tips}
</div>"#,
        number = step.step_number,
        title = escape_html(&step.title),
        description = escape_html(&step.description),
        tips = step_tips(&step.tips),
    )
}

pub fn tutorial_content(tutorial: &Tutorial) -> String {
    let materials: String = tutorial
        .materials_needed
        .iter()
        .map(|m| material_chip(m))
        .collect();
    let steps: String = tutorial.steps.iter().map(tutorial_step).collect();

    format!(
        r#"<div style="background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
    <h2 class="section-title">{title}</h2>
    <p style="font-size: 1.1rem; color: #666; text-align: center; margin-bottom: 30px;">{description}</p>
    <div style="margin-bottom: 30px;">
        <h3 style="margin-bottom: 20px;">Materials Needed</h3>
        <div style="display: flex; flex-wrap: wrap; gap: 10px;">{materials}</div>
    </div>
    <div style="margin-bottom: 30px;">
        <h3 style="margin-bottom: 20px;">Step-by-Step Instructions</h3>
        <div class="tutorial-steps">{steps}</div>
    </div>
    <div style="background: #f8f9fa; padding: 20px; border-radius: 8px;">
        <h3 style="margin-bottom: 15px;">Tutorial Information</h3>
        <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px;">
            <div>
                <strong>Estimated Time:</strong>
                <p style="margin: 5px 0 0 0; color: #666;">{estimated_time}</p>
            </div>
            <div>
                <strong>Difficulty Level:</strong>
                <p style="margin: 5px 0 0 0; color: #666;">
                    <span class="difficulty-badge" style="background: {color}; color: white; padding: 2px 8px; border-radius: 12px; font-size: 0.8rem;">{difficulty}</span>
                </p>
            </div>
            <div>
                <strong>Generated On:</strong>
                <p style="margin: 5px 0 0 0; color: #666;">{created_date}</p>
            </div>
        </div>
    </div>
</div>"#,
        title = escape_html(&tutorial.title),
        description = escape_html(&tutorial.description),
        estimated_time = escape_html(&tutorial.estimated_time),
        color = difficulty_color(&tutorial.difficulty),
        difficulty = escape_html(&capitalize(&tutorial.difficulty)),
        created_date = escape_html(&tutorial.created_date),
    )
}

pub fn chat_message(text: &str) -> String {
    format!("<p>{}</p>", escape_html(text))
}

pub fn image_preview(data_url: &str) -> String {
    format!(
        r#"<img src="{}" alt="Preview" style="max-width: 100%; max-height: 200px;">"#,
        escape_html(data_url)
    )
}
