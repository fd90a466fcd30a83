mod error;
mod grid;
mod layer;
mod tile;

pub use error::MapError;
pub use grid::TileGrid;
pub use layer::MapLayer;
pub use tile::{
    FenceEdge, ObjectSlot, Tile, TileLabel, TileLayerData, TintColor, EMPTY_ID, OBJECT_SLOTS,
};

use bevy::prelude::*;

use crate::editor::{ActiveGesture, CommandHistory, LabelPrompt};

/// Message to grow or shrink the map by signed margins on each side
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeMapRequest {
    pub north: i32,
    pub east: i32,
    pub south: i32,
    pub west: i32,
}

/// Apply resize requests. Recorded edits and a pending label both refer to
/// old positions, so a successful resize drops the undo history and closes
/// the label prompt.
fn resize_map_system(
    mut events: MessageReader<ResizeMapRequest>,
    mut grid: ResMut<TileGrid>,
    mut history: ResMut<CommandHistory>,
    mut active: ResMut<ActiveGesture>,
    mut label_prompt: ResMut<LabelPrompt>,
) {
    for request in events.read() {
        // An unfinished gesture has already written to the old layout
        if let Some(gesture) = active.take() {
            debug!(
                "Cancelling {} with {} pending edits before resize",
                gesture.tool().display_name(),
                gesture.pending_edits()
            );
            gesture.cancel(&mut grid);
        }

        match grid.resize(request.north, request.east, request.south, request.west) {
            Ok(size) => {
                history.clear();
                if label_prompt.is_open() {
                    label_prompt.close();
                }
                info!(
                    "Resized map by (n {}, e {}, s {}, w {}) to {}x{}, {} tiles kept",
                    request.north,
                    request.east,
                    request.south,
                    request.west,
                    size.x,
                    size.y,
                    grid.tile_count()
                );
            }
            Err(e) => {
                warn!("Rejected map resize: {}", e);
            }
        }
    }
}

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TileGrid>()
            .add_message::<ResizeMapRequest>()
            .add_systems(
                Update,
                resize_map_system.run_if(on_message::<ResizeMapRequest>),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::gesture::LabelRequest;
    use crate::editor::history::{EditorCommand, TileChange, TileEdit};
    use crate::editor::EditorTool;
    use crate::map::TintColor;

    fn app_with_map(width: u32, height: u32) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<CommandHistory>()
            .init_resource::<ActiveGesture>()
            .init_resource::<LabelPrompt>()
            .add_plugins(MapPlugin);
        app.insert_resource(TileGrid::new(width, height).unwrap());
        app
    }

    fn paint(app: &mut App, pos: IVec2, terrain: u32) {
        let world = app.world_mut();
        world.resource_scope(|world, mut grid: Mut<TileGrid>| {
            let mut history = world.resource_mut::<CommandHistory>();
            let mut command = EditorCommand::new(EditorTool::TerrainPencil);
            command.push(TileEdit::new(
                &grid,
                pos,
                MapLayer::Surface,
                TileChange::Terrain { from: 0, to: terrain },
            ));
            history.commit(command, &mut grid);
        });
    }

    #[test]
    fn test_resize_request_moves_tiles_and_clears_history() {
        let mut app = app_with_map(10, 10);
        paint(&mut app, IVec2::new(3, 4), 7);
        assert!(app.world().resource::<CommandHistory>().can_undo());

        app.world_mut().write_message(ResizeMapRequest {
            north: 1,
            east: 0,
            south: 0,
            west: 2,
        });
        app.update();

        let grid = app.world().resource::<TileGrid>();
        assert_eq!(grid.size(), UVec2::new(12, 11));
        assert_eq!(grid.terrain(IVec2::new(5, 5), MapLayer::Surface), Some(7));
        assert!(!app.world().resource::<CommandHistory>().can_undo());
    }

    #[test]
    fn test_rejected_resize_keeps_everything() {
        let mut app = app_with_map(3, 3);
        paint(&mut app, IVec2::new(1, 1), 2);
        let before = app.world().resource::<TileGrid>().clone();

        app.world_mut().write_message(ResizeMapRequest {
            north: 0,
            east: -3,
            south: 0,
            west: 0,
        });
        app.update();

        assert_eq!(*app.world().resource::<TileGrid>(), before);
        assert!(app.world().resource::<CommandHistory>().can_undo());
    }

    #[test]
    fn test_resize_closes_pending_label_prompt() {
        let mut app = app_with_map(10, 10);
        paint(&mut app, IVec2::new(0, 0), 4);
        app.world_mut().resource_mut::<LabelPrompt>().open(
            LabelRequest {
                pos: IVec2::new(0, 0),
                layer: MapLayer::Surface,
            },
            None,
        );

        app.world_mut().write_message(ResizeMapRequest {
            north: 0,
            east: 0,
            south: 0,
            west: 2,
        });
        app.update();

        assert!(!app.world().resource::<LabelPrompt>().is_open());

        // The painted tile moved; nothing can still target its old position
        let grid = app.world().resource::<TileGrid>();
        assert_eq!(grid.terrain(IVec2::new(2, 0), MapLayer::Surface), Some(4));
        assert_eq!(grid.label(IVec2::new(2, 0), MapLayer::Surface), Some(None));
        assert_eq!(grid.tile(IVec2::new(0, 0)), None);
    }

    #[test]
    fn test_rejected_resize_keeps_label_prompt() {
        let mut app = app_with_map(3, 3);
        let request = LabelRequest {
            pos: IVec2::new(1, 1),
            layer: MapLayer::Cave,
        };
        app.world_mut().resource_mut::<LabelPrompt>().open(request, None);

        app.world_mut().write_message(ResizeMapRequest {
            north: -3,
            east: 0,
            south: 0,
            west: 0,
        });
        app.update();

        let prompt = app.world().resource::<LabelPrompt>();
        assert_eq!(prompt.request(), Some(request));

        // Still valid against the unchanged grid
        let world = app.world_mut();
        world.resource_scope(|world, mut grid: Mut<TileGrid>| {
            let mut history = world.resource_mut::<CommandHistory>();
            assert!(request.commit(&mut grid, &mut history, "Cellar", TintColor::rgb(255, 255, 255)));
        });
        let grid = app.world().resource::<TileGrid>();
        assert_eq!(
            grid.label(IVec2::new(1, 1), MapLayer::Cave)
                .flatten()
                .map(|label| label.text.as_str()),
            Some("Cellar")
        );
    }
}
