#[macro_export]
macro_rules! text {
    ($content:expr) => {{
        let text = $crate::Node::text();
        let content = ::std::string::ToString::to_string(&$content);
        $crate::Node::set_text(&text, &content);
        text
    }};
}

/// Creates an element node.
///
/// The body is a `;`-separated list of `name => value` attributes and child
/// node expressions, applied in order:
///
/// ```ignore
/// element!("div", {
///     class => "pose-canvas";
///     "data-state" => "idle";
///     element!("canvas");
/// })
/// ```
#[macro_export]
macro_rules! element {
    ($name:expr) => {
        $crate::element!($name, {})
    };
    ($name:expr, { $($body:tt)* }) => {{
        let name = ::std::string::ToString::to_string(&$name);
        let element = $crate::Node::element(None, &name);
        $crate::node_body!(&element; $($body)*);
        element
    }};
}

#[macro_export]
macro_rules! fragment {
    ($($body:tt)*) => {{
        let fragment = $crate::Node::fragment();
        $crate::node_body!(&fragment; $($body)*);
        fragment
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! node_body {
    ($node:expr;) => {};
    ($node:expr; $key:ident => $value:expr $(; $($rest:tt)*)?) => {
        $crate::Node::set_attr(
            $node,
            ::std::stringify!($key),
            &::std::string::ToString::to_string(&$value),
        );
        $crate::node_body!($node; $($($rest)*)?);
    };
    ($node:expr; $key:literal => $value:expr $(; $($rest:tt)*)?) => {
        $crate::Node::set_attr($node, $key, &::std::string::ToString::to_string(&$value));
        $crate::node_body!($node; $($($rest)*)?);
    };
    ($node:expr; $child:expr $(; $($rest:tt)*)?) => {
        $crate::Node::insert($node, &$child, None);
        $crate::node_body!($node; $($($rest)*)?);
    };
}
