// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // String-type concatenation shorthand!
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

#[macro_export]
macro_rules! first_non_empty {
    // First candidate that isn't "", else the last expression.
    ($($cand:expr),+ ; else $fallback:expr) => {{
        let mut picked: Option<::std::string::String> = None;
        $(
            if picked.is_none() {
                let c: ::std::string::String = $cand;
                if !c.is_empty() { picked = Some(c); }
            }
        )+
        picked.unwrap_or_else(|| ::std::string::String::from($fallback))
    }};
}
