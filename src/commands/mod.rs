//  ____       _      ____
// |  _ \ __ _(_)_ __|  _ \ __ _ ___ ___
// | |_) / _` | | '__| |_) / _` / __/ __|
// |  __/ (_| | | |  |  __/ (_| \__ \__ \
// |_|   \__,_|_|_|  |_|   \__,_|___/___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2025-08-12
// Version : 0.1.0
// License : Mulan PSL v2
//
// Commands

pub mod password_gen;
pub mod testpass;
