/*  lunar_calendar | Vietnamese lunisolar calendar conversion.
 *  Copyright (c) 2021 incredimo. All rights reserved.

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as
    published by the Free Software Foundation, either version 3 of the
    License, or (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::env;

use chrono::NaiveDate;
use lunar_calendar::{solar_to_lunar, VIETNAM_TIME_ZONE};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <YYYY-MM-DD>", args[0]);
        return;
    }

    let date = match NaiveDate::parse_from_str(&args[1], "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => {
            eprintln!("Invalid date {}: {}", args[1], e);
            return;
        }
    };

    match solar_to_lunar(date, VIETNAM_TIME_ZONE) {
        Ok(lunar) => println!("{}\t{}\tjd {}", date, lunar, lunar.julian_day),
        Err(e) => eprintln!("Error: {}", e),
    }
}
