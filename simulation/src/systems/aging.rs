//! Aging System - every living individual gets one year older

use hecs::World;

use crate::components::{Age, Alive, Dead};

pub fn aging_system(world: &mut World) {
    for (_, age) in world.query_mut::<&mut Age>().with::<&Alive>().without::<&Dead>() {
        age.years = age.years.saturating_add(1);
    }
}
