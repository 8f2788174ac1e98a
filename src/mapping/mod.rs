// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Arc icon and color names translated to what Zen and Firefox accept.

const SELECTABLE_ICON_PREFIX: &str = "chrome://browser/skin/zen-icons/selectable/";
const DEFAULT_ICON: &str = "globe";
const DEFAULT_COLOR: &str = "gray";
const DEFAULT_CONTAINER_ICON: &str = "briefcase";

/// Name translation used by the allocator and the engine. Every method is total.
pub trait IconMapper: Send + Sync {
    /// Arc symbol name to a Zen workspace icon URL.
    fn map_icon(&self, arc_icon: &str) -> String;
    /// Arc color name to a Zen/Firefox color name.
    fn map_color(&self, arc_color: &str) -> String;
    /// Arc symbol name to one of Firefox's fixed container icons.
    fn map_container_icon(&self, arc_icon: &str) -> String;
}

/// Built-in tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZenIconMapper;

impl IconMapper for ZenIconMapper {
    fn map_icon(&self, arc_icon: &str) -> String {
        let svg = selectable_svg(arc_icon).unwrap_or(DEFAULT_ICON);
        format!("{SELECTABLE_ICON_PREFIX}{svg}.svg")
    }

    fn map_color(&self, arc_color: &str) -> String {
        zen_color(arc_color).unwrap_or(DEFAULT_COLOR).to_owned()
    }

    fn map_container_icon(&self, arc_icon: &str) -> String {
        container_icon(arc_icon)
            .unwrap_or(DEFAULT_CONTAINER_ICON)
            .to_owned()
    }
}

fn selectable_svg(arc_icon: &str) -> Option<&'static str> {
    let svg = match arc_icon {
        "briefcase" | "office" | "business" => "briefcase",
        "build" => "build",
        "construct" => "construct",
        "card" => "card",
        "wallet" => "wallet",
        "coins" | "money" => "coins",
        "dollar" => "logo-usd",

        "mail" | "email" => "mail",
        "call" | "phone" => "call",
        "chat" | "message" => "chat",
        "megaphone" => "megaphone",

        "code" => "code",
        "terminal" => "terminal",
        "bug" => "bug",
        "extension-puzzle" | "plugin" => "extension-puzzle",
        "flask" | "test" => "flask",

        "folder" => "folder",
        "page" | "document" => "page",
        "book" => "book",
        "bookmark" => "bookmark",
        "inbox" => "inbox",
        "layers" => "layers",

        "music" => "music",
        "video" => "video",
        "image" | "photo" => "image",
        "game-controller" | "game" | "gaming" => "game-controller",
        "volume-high" | "sound" => "volume-high",

        "pizza" => "pizza",
        "fast-food" => "fast-food",
        "cafe" | "coffee" => "cafe",
        "ice-cream" => "ice-cream",
        "cutlery" | "dining" => "cutlery",
        "fish" => "fish",
        "egg" => "egg",

        "globe" | "world" | "internet" => "globe",
        "globe-1" => "globe-1",
        "map" => "map",
        "location" | "pin" => "location",
        "navigate" | "compass" => "navigate",
        "airplane" | "plane" => "airplane",

        "heart" => "heart",
        // Zen's `star.svg` is the sparkle; the five-pointed star is `star-1.svg`.
        "star" | "star-1" | "favorite" => "star-1",
        "sparkle" => "star",
        "people" | "users" => "people",
        "eye" | "view" => "eye",
        "bed" | "sleep" => "bed",
        "shirt" | "clothing" => "shirt",

        "sun" => "sun",
        "moon" => "moon",
        "cloud" => "cloud",
        "water" => "water",
        "leaf" | "plant" => "leaf",
        "flame" | "fire" => "flame",
        "lightning" | "bolt" => "lightning",

        "school" | "education" => "school",
        "brush" | "art" => "brush",
        "palette" => "palette",

        "american-football" | "football" => "american-football",
        "baseball" => "baseball",
        "paw" | "pet" => "paw",

        "lock-closed" | "lock" => "lock-closed",
        "key" => "key",
        "warning" | "alert" => "warning",

        "rocket" => "rocket",
        "planet" | "space" => "planet",
        "nuclear" => "nuclear",

        "bell" => "bell",
        "flag" => "flag",
        "present" | "gift" => "present",
        "tada" => "tada",
        "ticket" => "ticket",
        "time" | "clock" => "time",
        "trash" | "delete" => "trash",
        "basket" | "cart" | "shopping" => "basket",
        "skull" => "skull",
        "weight" | "fitness" => "weight",
        "logo-rss" | "rss" => "logo-rss",
        "stats-chart" | "chart" | "analytics" => "stats-chart",
        _ => return None,
    };
    Some(svg)
}

fn zen_color(arc_color: &str) -> Option<&'static str> {
    let color = match arc_color {
        "blue" | "light-blue" | "dark-blue" | "sky-blue" | "navy" => "blue",
        "red" | "light-red" | "dark-red" | "crimson" => "red",
        "green" | "light-green" | "dark-green" | "lime" => "green",
        "yellow" => "yellow",
        "orange" | "light-orange" | "dark-orange" => "orange",
        "purple" | "light-purple" | "dark-purple" | "violet" | "indigo" => "purple",
        "pink" | "light-pink" | "dark-pink" | "magenta" => "pink",
        "cyan" | "turquoise" => "turquoise",
        "gray" | "grey" => "gray",
        "black" => "black",
        "white" => "white",
        _ => return None,
    };
    Some(color)
}

/// Firefox only ships fingerprint, briefcase, dollar, cart, circle, gift, vacation, food, fruit,
/// pet, tree, chill and fence.
fn container_icon(arc_icon: &str) -> Option<&'static str> {
    let icon = match arc_icon {
        "briefcase" | "office" | "business" | "build" | "construct" => "briefcase",
        "card" | "wallet" | "coins" | "money" | "dollar" => "dollar",
        "basket" | "cart" | "shopping" => "cart",
        "pizza" | "fast-food" | "cafe" | "coffee" | "ice-cream" | "cutlery" | "dining" | "fish"
        | "egg" => "food",
        "leaf" | "plant" | "sun" => "tree",
        "moon" | "cloud" | "water" | "bed" | "sleep" => "chill",
        "people" | "users" | "eye" | "lock-closed" | "lock" | "key" => "fingerprint",
        "globe" | "globe-1" | "world" | "internet" | "map" | "location" | "pin" | "navigate"
        | "compass" | "airplane" | "plane" => "vacation",
        "paw" | "pet" => "pet",
        "present" | "gift" | "tada" => "gift",
        "fruit" => "fruit",
        "heart" | "star" | "favorite" | "bell" | "flag" | "ticket" | "time" | "clock" | "music"
        | "video" | "image" | "photo" | "game" | "gaming" | "code" | "terminal" | "bug"
        | "rocket" | "planet" | "space" | "flame" | "fire" | "lightning" | "bolt" => "circle",
        _ => return None,
    };
    Some(icon)
}
