/// Declare a lesson's fixed phase set as an enum with tags and entry cues.
///
/// ```ignore
/// lesson_phases! {
///     pub enum FoilPhase {
///         Setup => "setup",
///         First => "first": Pop,
///         Complete => "complete",
///     }
/// }
/// ```
macro_rules! lesson_phases {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $tag:literal $(: $cue:ident)?),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn tag(self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }

            pub fn cue(self) -> Option<::mathmotion_timeline_core::SoundCue> {
                match self {
                    $($name::$variant => lesson_phases!(@cue $($cue)?)),+
                }
            }

            /// Out-of-range indices clamp to the terminal phase.
            pub fn from_index(index: usize) -> Self {
                Self::ALL[index.min(Self::ALL.len() - 1)]
            }

            pub fn index(self) -> usize {
                Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
            }

            pub fn specs() -> Vec<::mathmotion_timeline_core::PhaseSpec> {
                Self::ALL
                    .iter()
                    .map(|p| {
                        let spec = ::mathmotion_timeline_core::PhaseSpec::new(p.tag());
                        match p.cue() {
                            Some(cue) => spec.with_cue(cue),
                            None => spec,
                        }
                    })
                    .collect()
            }
        }
    };
    (@cue) => { None };
    (@cue $cue:ident) => { Some(::mathmotion_timeline_core::SoundCue::$cue) };
}
