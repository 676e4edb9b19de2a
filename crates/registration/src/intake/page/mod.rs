//! HTML rendering of a `RenderState`.
//!
//! Field values in the state are already escaped and are written verbatim.
//! Static text (catalog names, messages) is escaped here.

mod celebration;

pub use celebration::{scatter, CelebrationPiece, CELEBRATION_GLYPHS};

use rand::Rng;
use serde_json::json;

use super::catalog::PROGRAM_CATALOG;
use super::domain::{FieldKey, NormalizedField};
use super::normalizer::escape_markup;
use super::render::{
    RenderState, PREVIEW_BIO_PLACEHOLDER, PREVIEW_EMAIL_PLACEHOLDER, PREVIEW_NAME_PLACEHOLDER,
    PREVIEW_PHONE_PLACEHOLDER, PREVIEW_PROGRAM_PLACEHOLDER,
};
use super::rules::{RuleSet, BIO_MAX_CHARS};

const EMPTY_SUMMARY_VALUE: &str = "—";

const STYLES: &str = r#"
body { font-family: Inter, ui-sans-serif, system-ui, sans-serif; background: linear-gradient(180deg,#f8fafc 0%,#eef2ff 100%); margin: 0; padding: 1.5rem; }
.layout { display: grid; grid-template-columns: repeat(auto-fit, minmax(22rem, 1fr)); gap: 1.5rem; max-width: 72rem; margin: 0 auto; }
.card { background: #fff; border-radius: 1rem; padding: 2rem; box-shadow: 0 20px 40px rgba(15,23,42,0.08); }
label { display: block; font-weight: 500; margin-top: 1rem; }
input, select, textarea { width: 100%; box-sizing: border-box; padding: 0.5rem 1rem; border: 1px solid #d1d5db; border-radius: 0.5rem; }
.error-message { color: #ef4444; font-size: 0.875rem; min-height: 1.25rem; }
.counter { color: #6b7280; font-size: 0.875rem; text-align: right; }
.preview-item { background: #f9fafb; border-radius: 0.5rem; padding: 0.75rem; margin-top: 0.75rem; }
.modal { position: fixed; inset: 0; display: flex; align-items: center; justify-content: center; background: rgba(0,0,0,0.4); z-index: 50; }
.modal.hidden { display: none; }
.modal-body { background: #fff; border-radius: 1rem; padding: 2rem; max-width: 32rem; width: 100%; }
.reference { font-size: 1.5rem; font-weight: 900; color: #312e81; }
.confetti { pointer-events: none; position: fixed; inset: 0; z-index: 60; overflow: hidden; }
.confetti span { position: absolute; top: -6%; animation: fall linear infinite; }
@keyframes fall { to { transform: translateY(120vh) rotate(720deg); } }
"#;

const SCRIPT: &str = r#"
(function () {
  var config = JSON.parse(document.getElementById('registration-rules').textContent);
  var form = document.getElementById('registrationForm');
  var byId = function (id) { return document.getElementById(id); };
  var clearErrors = function () {
    document.querySelectorAll('.error-message').forEach(function (el) { el.textContent = ''; });
  };
  var check = function (rule, value) {
    if (config.blankValues.indexOf(value) !== -1) { return rule.requiredMessage || null; }
    var candidate = rule.stripPattern ? value.replace(new RegExp(rule.stripPattern, 'g'), '') : value;
    if (rule.pattern && !new RegExp(rule.pattern).test(candidate)) { return rule.patternMessage; }
    if (rule.maxChars && candidate.length > rule.maxChars) { return rule.lengthMessage; }
    return null;
  };
  var updatePreview = function () {
    var p = config.placeholders;
    var text = function (id) { return byId(id).value.trim(); };
    var program = byId('program');
    byId('previewName').textContent = text('fullName') || p.name;
    byId('previewEmail').textContent = text('email') || p.email;
    byId('previewPhone').textContent = text('phone') || p.phone;
    byId('previewBio').textContent = text('bio') || p.bio;
    byId('previewProgram').textContent = program.value ? program.options[program.selectedIndex].text : p.program;
    byId('bioCount').textContent = byId('bio').value.length;
  };
  if (form) {
    ['fullName', 'email', 'phone', 'bio', 'program'].forEach(function (id) {
      ['input', 'change'].forEach(function (type) {
        byId(id).addEventListener(type, function () { updatePreview(); byId(id + 'Error').textContent = ''; });
      });
    });
    form.addEventListener('submit', function (event) {
      clearErrors();
      var first = null;
      config.rules.forEach(function (rule) {
        var raw = byId(rule.field).value;
        var value = (rule.field === 'bio' || rule.field === 'program') ? raw : raw.trim();
        var message = check(rule, value);
        if (message) {
          byId(rule.field + 'Error').textContent = message;
          first = first || rule.field;
        }
      });
      if (first) {
        event.preventDefault();
        byId(first).focus();
        byId(first).scrollIntoView({ behavior: 'smooth', block: 'center' });
      }
    });
    updatePreview();
  }
  var close = byId('closeModal');
  if (close) {
    close.focus();
    close.addEventListener('click', function () {
      byId('successModal').classList.add('hidden');
      var confetti = byId('confettiContainer');
      if (confetti) { confetti.remove(); }
    });
  }
})();
"#;

/// Renders the full document. `rng` only feeds the cosmetic overlay.
pub fn render_page<R>(state: &RenderState, rules: &RuleSet, rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\" />\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
    );
    html.push_str(&format!("<title>{}</title>\n", state.title()));
    html.push_str("<style>");
    html.push_str(STYLES);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"layout\">\n");
    html.push_str(&form_card(state));
    html.push_str(&preview_card(state));
    html.push_str("</div>\n");

    if let Some(signal) = state.celebration {
        html.push_str("<div class=\"confetti\" id=\"confettiContainer\" aria-hidden=\"true\">\n");
        for piece in scatter(signal.pieces, rng) {
            html.push_str(&format!(
                "<span style=\"{}\">{}</span>\n",
                piece.style(),
                piece.glyph
            ));
        }
        html.push_str("</div>\n");
    }

    html.push_str(&confirmation_modal(state));
    html.push_str(&format!(
        "<script id=\"registration-rules\" type=\"application/json\">{}</script>\n",
        script_config(rules)
    ));
    html.push_str("<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

/// Rules plus preview placeholders, safe to embed inside a script element.
fn script_config(rules: &RuleSet) -> String {
    let mut config = rules.to_json();
    config["placeholders"] = json!({
        "name": PREVIEW_NAME_PLACEHOLDER,
        "program": PREVIEW_PROGRAM_PLACEHOLDER,
        "email": PREVIEW_EMAIL_PLACEHOLDER,
        "phone": PREVIEW_PHONE_PLACEHOLDER,
        "bio": PREVIEW_BIO_PLACEHOLDER,
    });
    config.to_string().replace('<', "\\u003c")
}

fn error_slot(state: &RenderState, field: FieldKey) -> String {
    let message = state.errors.get(field).map(escape_markup).unwrap_or_default();
    format!(
        "<div id=\"{}Error\" class=\"error-message\">{}</div>\n",
        field.as_str(),
        message
    )
}

fn input_control(
    state: &RenderState,
    field: FieldKey,
    input_type: &str,
    value: &NormalizedField,
    placeholder: &str,
) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n<input type=\"{input_type}\" id=\"{name}\" name=\"{name}\" required value=\"{value}\" placeholder=\"{placeholder}\" aria-describedby=\"{name}Error\">\n{error}",
        name = field.as_str(),
        label = field.label(),
        input_type = input_type,
        value = value,
        placeholder = escape_markup(placeholder),
        error = error_slot(state, field),
    )
}

fn form_card(state: &RenderState) -> String {
    let fields = &state.fields;
    let mut html = String::new();
    html.push_str("<div class=\"card\">\n<h1>Student Registration Form</h1>\n");
    html.push_str("<p>Fill the form to register. The preview updates as you type and is never submitted.</p>\n");
    html.push_str("<form id=\"registrationForm\" action=\"/\" method=\"POST\" novalidate>\n");
    html.push_str(&input_control(
        state,
        FieldKey::FullName,
        "text",
        &fields.full_name,
        "e.g., John Doe",
    ));
    html.push_str(&input_control(
        state,
        FieldKey::Email,
        "email",
        &fields.email,
        "you@example.com",
    ));
    html.push_str(&input_control(
        state,
        FieldKey::Phone,
        "tel",
        &fields.phone,
        "+91 9876543210",
    ));

    html.push_str(&format!(
        "<label for=\"program\">{}</label>\n<select id=\"program\" name=\"program\" required aria-describedby=\"programError\">\n<option value=\"\">Select a Program</option>\n",
        FieldKey::Program.label()
    ));
    for entry in PROGRAM_CATALOG {
        let selected = if fields.selected_program == Some(entry.code) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            entry.code,
            selected,
            escape_markup(entry.name)
        ));
    }
    html.push_str("</select>\n");
    html.push_str(&error_slot(state, FieldKey::Program));

    html.push_str(&format!(
        "<label for=\"bio\">{} (optional, max {max} chars)</label>\n<textarea id=\"bio\" name=\"bio\" rows=\"4\" maxlength=\"{max}\" placeholder=\"Tell us a bit about yourself...\">{}</textarea>\n",
        FieldKey::Bio.label(),
        fields.bio,
        max = BIO_MAX_CHARS,
    ));
    html.push_str(&error_slot(state, FieldKey::Bio));
    html.push_str(&format!(
        "<div class=\"counter\"><span id=\"bioCount\">{}</span>/{}</div>\n",
        state.bio_count, BIO_MAX_CHARS
    ));
    html.push_str("<button type=\"submit\">Submit Application</button>\n</form>\n</div>\n");
    html
}

fn preview_card(state: &RenderState) -> String {
    let preview = &state.preview;
    format!(
        "<div class=\"card\" id=\"previewCard\">\n<h2>Live Preview</h2>\n<div id=\"previewName\">{}</div>\n<div id=\"previewProgram\">{}</div>\n<div class=\"preview-item\">Email<div id=\"previewEmail\">{}</div></div>\n<div class=\"preview-item\">Phone<div id=\"previewPhone\">{}</div></div>\n<div class=\"preview-item\">Bio<div id=\"previewBio\">{}</div></div>\n</div>\n",
        preview.name, preview.program, preview.email, preview.phone, preview.bio
    )
}

fn confirmation_modal(state: &RenderState) -> String {
    let Some(confirmation) = &state.confirmation else {
        return String::new();
    };

    let bio = if confirmation.bio.is_empty() {
        EMPTY_SUMMARY_VALUE.to_string()
    } else {
        line_breaks(confirmation.bio.as_str())
    };

    format!(
        "<div id=\"successModal\" class=\"modal\" aria-hidden=\"false\">\n<div class=\"modal-body\">\n<button id=\"closeModal\" aria-label=\"Close\">&times;</button>\n<h3>Application Submitted</h3>\n<p>Your Reference ID</p>\n<p class=\"reference\">{reference}</p>\n<h4>Summary</h4>\n<div class=\"preview-item\">Name<div>{name}</div></div>\n<div class=\"preview-item\">Email<div>{email}</div></div>\n<div class=\"preview-item\">Phone<div>{phone}</div></div>\n<div class=\"preview-item\">Program<div>{program}</div></div>\n<div class=\"preview-item\">Bio<div>{bio}</div></div>\n<a href=\"/\">Register Another</a>\n<button onclick=\"window.print();\">Print / Save</button>\n</div>\n</div>\n",
        reference = confirmation.reference_id,
        name = confirmation.full_name,
        email = confirmation.email,
        phone = confirmation.phone,
        program = escape_markup(&confirmation.program_name),
        bio = bio,
    )
}

fn line_breaks(value: &str) -> String {
    value.split('\n').collect::<Vec<_>>().join("<br />\n")
}
