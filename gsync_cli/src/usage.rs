pub const GENERAL: &str = "
Usage: gsync <method> [options]

Type 'gsync <method> help' for help on a specific method.

Gsync is a tool for syncing a set of directories with corresponding file
Ids on Google drive. All the hard work is done through calls to gdrive.


Available methods:

   * add:\tadds a folder file id pair
   * delete:\tremoves a folder file id pair
   * push:\tsync upload
   * pull:\tsync download
   * list:\tlist sync directories
   * help:\tprint this message
";

pub const ADD: &str = "
Usage: gsync add [folder] [google_file_id]

If the Google drive folder is not empty, its content is moved into a new
sibling folder named <folder name>-gsync, which is registered instead.
";

pub const DELETE: &str = "
Usage:
   gsync delete id [database id]\t -delete database id
   gsync delete path [folder path]\t -delete folder path
   gsync delete gid [Google file ID]\t -delete Google file ID
";

pub const LIST: &str = "
Usage: gsync list
";

pub const PUSH: &str = "
Usage: gsync push [-gdrive_opt1] [[-gdrive_opt2] ...
";

pub const PULL: &str = "
Usage: gsync pull [-gdrive_opt1] [[-gdrive_opt2] ...
";
