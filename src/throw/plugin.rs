use bevy::prelude::*;

use crate::game::sets::GameSet;
use crate::throw::systems::{advance_throw_charge, handle_throw_input};

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (handle_throw_input, advance_throw_charge)
            .chain()
            .in_set(GameSet::Interaction),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carry::events::{DropRequest, Dropped};
    use crate::input::events::ActionEvent;

    #[test]
    fn test_plugin_can_be_added_to_app() {
        let mut app = App::new();
        app.add_plugins(bevy::time::TimePlugin::default());
        app.add_message::<ActionEvent>();
        app.add_message::<DropRequest>();
        app.add_message::<Dropped>();
        app.add_plugins(plugin);
        app.update();
    }
}
