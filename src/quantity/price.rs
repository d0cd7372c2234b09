quantity!(
    /// Market price in Polish złoty per megawatt-hour.
    ZlotyPerMegawattHour,
    suffix: "PLN/MWh"
);
