//! Static app registry: display name -> URL scheme.
//!
//! The phone's launcher is driven by URL schemes (`weixin://`), but users and
//! models name apps by their display name, in Chinese or English.  Both
//! spellings map to the same scheme.  Lookups are exact and case-sensitive.

/// Display name (including aliases) and URL scheme, in registry order.
const APP_SCHEMES: &[(&str, &str)] = &[
    ("微信", "weixin://"),
    ("WeChat", "weixin://"),
    ("小红书", "xhsdiscover://home"),
    ("RedNote", "xhsdiscover://home"),
    ("淘宝", "taobao://"),
    ("taobao", "taobao://"),
    ("微博", "sinaweibo://gotohome"),
    ("weibo", "sinaweibo://gotohome"),
    ("支付宝", "alipay://"),
    ("alipay", "alipay://"),
    ("相机", "Camera://"),
    ("Camera", "Camera://"),
    ("笔记", "Notes://"),
    ("Notes", "Notes://"),
    ("qunar", "qunariphone://home?module=main"),
    ("去哪儿", "qunariphone://home?module=main"),
    ("京东", "openapp.jdmobile://"),
    ("JD", "openapp.jdmobile://"),
];

/// Returns the URL scheme registered for `app`.
pub fn package_name(app: &str) -> Option<&'static str> {
    APP_SCHEMES
        .iter()
        .find(|(name, _)| *name == app)
        .map(|(_, scheme)| *scheme)
}

/// Returns the first display name registered for `scheme`.
pub fn app_name(scheme: &str) -> Option<&'static str> {
    APP_SCHEMES
        .iter()
        .find(|(_, s)| *s == scheme)
        .map(|(name, _)| *name)
}

/// All display names, aliases included, in registry order.
pub fn supported_apps() -> Vec<&'static str> {
    APP_SCHEMES.iter().map(|(name, _)| *name).collect()
}
