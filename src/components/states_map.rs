use crate::catalog;
use crate::model::{GameEvent, GameMode, GameState, Highlight, ScreenPos};
use yew::prelude::*;

const TILE: i32 = 56;
const GAP: i32 = 4;
const COLS: i32 = 12;
const ROWS: i32 = 8;

// Tile-grid cartogram: (abbreviation, column, row).
const TILES: [(&str, i32, i32); 51] = [
    ("AK", 0, 0), ("ME", 11, 0),
    ("WI", 6, 1), ("VT", 10, 1), ("NH", 11, 1),
    ("WA", 1, 2), ("ID", 2, 2), ("MT", 3, 2), ("ND", 4, 2), ("MN", 5, 2), ("IL", 6, 2),
    ("MI", 7, 2), ("NY", 9, 2), ("MA", 10, 2),
    ("OR", 1, 3), ("NV", 2, 3), ("WY", 3, 3), ("SD", 4, 3), ("IA", 5, 3), ("IN", 6, 3),
    ("OH", 7, 3), ("PA", 8, 3), ("NJ", 9, 3), ("CT", 10, 3), ("RI", 11, 3),
    ("CA", 1, 4), ("UT", 2, 4), ("CO", 3, 4), ("NE", 4, 4), ("MO", 5, 4), ("KY", 6, 4),
    ("WV", 7, 4), ("VA", 8, 4), ("MD", 9, 4), ("DE", 10, 4),
    ("AZ", 2, 5), ("NM", 3, 5), ("KS", 4, 5), ("AR", 5, 5), ("TN", 6, 5), ("NC", 7, 5),
    ("SC", 8, 5), ("DC", 9, 5),
    ("OK", 4, 6), ("LA", 5, 6), ("MS", 6, 6), ("AL", 7, 6), ("GA", 8, 6),
    ("HI", 0, 7), ("TX", 4, 7), ("FL", 9, 7),
];

fn fill(h: Highlight) -> &'static str {
    match h {
        Highlight::Default => "#FFFFFF",
        Highlight::Hovered => "#a5d6a7",
        Highlight::Selected => "#81c784",
        Highlight::Completed => "#E0E0E0",
        Highlight::CompletedHovered => "#cfcfcf",
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct StatesMapProps {
    pub game: GameState,
    pub hovered: Option<String>,
    pub on_event: Callback<GameEvent>,
    pub on_hover: Callback<Option<String>>,
}

#[function_component]
pub fn StatesMap(props: &StatesMapProps) -> Html {
    let hovered = props.hovered.as_deref();
    // labels would give hard-mode answers away
    let labelled = props.game.mode == GameMode::Easy;
    let tile = |&(abbr, col, row): &(&'static str, i32, i32)| {
        let name = catalog::name_for(abbr);
        let highlight = props.game.highlight(name, hovered);
        let x = col * TILE;
        let y = row * TILE;
        let size = TILE - GAP;
        let onclick = {
            let cb = props.on_event.clone();
            Callback::from(move |e: MouseEvent| {
                cb.emit(GameEvent::SelectFromMap {
                    region: name.to_string(),
                    pos: ScreenPos {
                        x: e.client_x(),
                        y: e.client_y(),
                    },
                })
            })
        };
        let onmouseenter = {
            let cb = props.on_hover.clone();
            Callback::from(move |_| cb.emit(Some(name.to_string())))
        };
        let onmouseleave = {
            let cb = props.on_hover.clone();
            Callback::from(move |_| cb.emit(None))
        };
        html! {
            <g key={abbr} {onclick} {onmouseenter} {onmouseleave} style="cursor:pointer;">
                { if labelled { html!{ <title>{ name }</title> } } else { html!{} } }
                <rect x={x.to_string()} y={y.to_string()} width={size.to_string()} height={size.to_string()} rx="6"
                    fill={fill(highlight)} stroke="#000" stroke-width="0.5" />
                { if labelled { html!{
                    <text x={(x + size / 2).to_string()} y={(y + size / 2 + 5).to_string()} text-anchor="middle"
                        font-size="14" fill="#374151" style="pointer-events:none; user-select:none;">{ abbr }</text>
                } } else { html!{} } }
            </g>
        }
    };
    let view_box = format!("0 0 {} {}", COLS * TILE, ROWS * TILE);
    html! {
        <div style="flex:1; min-width:0; display:flex; align-items:center; justify-content:center;">
            <svg viewBox={view_box} style="width:100%; max-height:calc(100vh - 200px);">
                { for TILES.iter().map(tile) }
            </svg>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_region_has_exactly_one_tile() {
        let abbrs: HashSet<_> = TILES.iter().map(|t| t.0).collect();
        let cells: HashSet<_> = TILES.iter().map(|t| (t.1, t.2)).collect();
        assert_eq!(abbrs.len(), catalog::CATALOG_SIZE);
        assert_eq!(cells.len(), catalog::CATALOG_SIZE);
        for (abbr, col, row) in TILES {
            assert!(catalog::find_by_abbreviation(abbr).is_some(), "{abbr}");
            assert!((0..COLS).contains(&col) && (0..ROWS).contains(&row));
        }
    }
}
