// src/render.rs
//
// HTML output for the card list. Cell text is always escaped; generated
// markup carries data attributes only, never handler code.

use crate::actions::dial_uri;
use crate::card::Card;
use crate::config::consts::{LABEL_ALL, LABEL_CALL, LABEL_COPY, MSG_NO_PROMOS, WINDOW_TITLE};
use crate::filter::CategoryFilter;

/// Element content: `&`, `<`, `>` (plus quotes, so the same text is also
/// safe inside an attribute).
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Attribute values (always double-quoted by this module).
#[inline]
pub fn escape_attr(s: &str) -> String {
    escape_html(s)
}

/// Inverse of `escape_html` for the entities it emits.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = rest.find('&') {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];
        let hit = [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>'), ("&quot;", '"'), ("&#39;", '\'')]
            .iter()
            .find(|(ent, _)| tail.starts_with(ent));
        match hit {
            Some((ent, ch)) => {
                out.push(*ch);
                rest = &tail[ent.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn card_html(card: &Card) -> String {
    let code = escape_attr(&card.code);
    let tel = escape_attr(&dial_uri(&card.code));
    format!(
        r#"<article class="promo-card" data-cat="{cat}">
  <div class="ribbon">{title}</div>
  <div class="card-body">
    <div class="main-left">
      <div class="speed">{speed}</div>
    </div>
    <div class="details">
      <div class="type">{ptype}</div>
      <div class="price">{price}</div>
      <div class="bonus">{bonus}</div>
    </div>
  </div>
  <div class="card-footer">
    <a class="call-btn" href="{tel}" data-code="{code}">{call}</a>
    <button class="copy-btn" type="button" data-code="{code}">{copy}</button>
  </div>
</article>
"#,
        cat = escape_attr(&card.category),
        title = escape_html(&card.title),
        speed = escape_html(&card.speed),
        ptype = escape_html(&card.promo_type),
        price = escape_html(&card.price_duration),
        bonus = escape_html(&card.bonus),
        tel = tel,
        code = code,
        call = LABEL_CALL,
        copy = LABEL_COPY,
    )
}

/// Whole container content for `cards`. Empty input renders nothing; the
/// caller shows `MSG_NO_PROMOS` in the message area instead.
pub fn cards_html<'a, I>(cards: I) -> String
where
    I: IntoIterator<Item = &'a Card>,
{
    cards.into_iter().map(card_html).collect()
}

fn filter_button(filter: &CategoryFilter, active: &CategoryFilter) -> String {
    let cat = match filter {
        // no category is blank, so "" can't collide with one
        CategoryFilter::All => s!(),
        CategoryFilter::Only(c) => escape_attr(c),
    };
    let class = if filter == active { "filter-btn active" } else { "filter-btn" };
    format!(
        r#"<button class="{class}" type="button" data-cat="{cat}">{label}</button>"#,
        label = escape_html(filter.label()),
    )
}

/// Standalone page: message area, filter buttons, cards passing `active`.
pub fn page_html(cards: &[Card], categories: &[String], active: &CategoryFilter, message: &str) -> String {
    let visible: Vec<&Card> = cards.iter().filter(|c| active.matches(c)).collect();

    let message = if !message.is_empty() {
        s!(message)
    } else if cards.is_empty() {
        s!(MSG_NO_PROMOS)
    } else {
        s!()
    };

    let mut filters = filter_button(&CategoryFilter::All, active);
    for c in categories {
        filters.push_str(&filter_button(&CategoryFilter::Only(c.clone()), active));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="th">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<div id="message">{message}</div>
<nav class="filters" aria-label="{all}">{filters}</nav>
<section id="cards">
{cards}</section>
</body>
</html>
"#,
        title = escape_html(WINDOW_TITLE),
        message = escape_html(&message),
        all = escape_attr(LABEL_ALL),
        filters = filters,
        cards = cards_html(visible),
    )
}
