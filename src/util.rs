// Copyright (c) 2022 Bastiaan Marinus van de Weerd


macro_rules! mod_days { ( $( $day:literal ),+ ) => { paste::paste! {
	$( mod [<day $day>]; )+
} } }

pub(crate) use mod_days;
